//! A group: one self-contained market of players, auctions and bids.
//!
//! ## Round flow
//!
//! ```text
//! choose_activity ──► auctioneer: auction opened
//!                 └─► trader: submit_bid (repeatable until clearing)
//!                           │
//!          (host barrier: every player done)
//!                           │
//! clear_market ──► assign_payoffs
//! ```
//!
//! `clear_market` runs once. Re-running it would re-draw tie-breaks, so a
//! second call is rejected with [`MarketError::AlreadyCleared`].

use rand::Rng;
use tracing::{debug, info, warn};

use crate::engine::clearing::{select_winner, ClearingResult};
use crate::engine::payoff::{satisfies_reservation, PayoffRule};
use crate::error::MarketError;
use crate::market::AuctionBook;
use crate::types::{
    Activity, Auction, AuctionId, AuctionOutcome, Bid, BidId, Currency, GroupId, ParticipantId,
    Player, Role,
};

/// Market parameters shared by every group of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketRules {
    pub payoff: PayoffRule,

    /// Reject bids that would make the bidder lose money
    pub enforce_reservation: bool,
}

impl Default for MarketRules {
    fn default() -> Self {
        Self {
            payoff: PayoffRule::default(),
            enforce_reservation: true,
        }
    }
}

/// One group of players trading among themselves.
#[derive(Debug)]
pub struct Group {
    id: GroupId,

    /// Ordered by `id_in_group`, starting at 1
    players: Vec<Player>,

    book: AuctionBook,
    rules: MarketRules,
    cleared: bool,
}

impl Group {
    /// Create a group with one player per evaluation; the first
    /// `num_sellers` players are sellers. Player `i` (0-based) gets
    /// `id_in_group == i + 1`.
    ///
    /// ```
    /// use volauction::market::{Group, MarketRules};
    /// use volauction::types::{Currency, Role};
    ///
    /// let evaluations = [4, 8, 9].map(Currency::from_int);
    /// let group = Group::from_evaluations(1, 1, &evaluations, 0, MarketRules::default());
    ///
    /// assert_eq!(group.player(1).unwrap().role, Role::Seller);
    /// assert_eq!(group.player(3).unwrap().role, Role::Buyer);
    /// ```
    pub fn from_evaluations(
        id: GroupId,
        num_sellers: u32,
        evaluations: &[Currency],
        first_participant: ParticipantId,
        rules: MarketRules,
    ) -> Self {
        let players: Vec<Player> = evaluations
            .iter()
            .enumerate()
            .map(|(i, &evaluation)| {
                let id_in_group = i as u32 + 1;
                Player::new(
                    first_participant + i as u64,
                    id,
                    id_in_group,
                    Role::from_id_in_group(id_in_group, num_sellers),
                    evaluation,
                )
            })
            .collect();

        Self {
            id,
            book: AuctionBook::with_capacity(players.len()),
            players,
            rules,
            cleared: false,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn id(&self) -> GroupId {
        self.id
    }

    #[inline]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id_in_group: u32) -> Option<&Player> {
        let index = (id_in_group as usize).checked_sub(1)?;
        self.players.get(index)
    }

    fn player_mut(&mut self, id_in_group: u32) -> Result<&mut Player, MarketError> {
        (id_in_group as usize)
            .checked_sub(1)
            .and_then(|index| self.players.get_mut(index))
            .ok_or(MarketError::UnknownPlayer(id_in_group))
    }

    fn require_player(&self, id_in_group: u32) -> Result<&Player, MarketError> {
        self.player(id_in_group)
            .ok_or(MarketError::UnknownPlayer(id_in_group))
    }

    #[inline]
    pub fn book(&self) -> &AuctionBook {
        &self.book
    }

    #[inline]
    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    // ========================================================================
    // Player actions
    // ========================================================================

    /// Record a player's activity choice.
    ///
    /// An auctioneer immediately opens one auction of their own kind
    /// (sellers sell, buyers buy); its id is returned.
    pub fn choose_activity(
        &mut self,
        id_in_group: u32,
        is_auctioneer: bool,
    ) -> Result<Option<AuctionId>, MarketError> {
        if self.cleared {
            return Err(MarketError::AlreadyCleared(self.id));
        }

        let group_id = self.id;
        let player = self.player_mut(id_in_group)?;
        if player.has_chosen() {
            return Err(MarketError::ActivityAlreadyChosen(id_in_group));
        }

        let activity = Activity::from_choice(is_auctioneer);
        player.activity = Some(activity);
        let kind = player.role.auction_kind();

        if !activity.is_auctioneer() {
            debug!(group = group_id, player = id_in_group, "player trades");
            return Ok(None);
        }

        let auction = self.book.open_auction(kind, group_id, id_in_group)?;
        debug!(group = group_id, player = id_in_group, auction, ?kind, "auction opened");
        Ok(Some(auction))
    }

    /// Create or update a trader's bid.
    ///
    /// # Errors
    ///
    /// - the player is unknown, has not chosen, or is an auctioneer
    /// - the auction is unknown, of the wrong kind, or the player's own
    /// - the price, rounded to the session's precision, is negative or
    ///   (when enforced) worse than the bidder's own evaluation
    /// - the market is already cleared
    pub fn submit_bid(
        &mut self,
        id_in_group: u32,
        auction: AuctionId,
        price: Currency,
    ) -> Result<BidId, MarketError> {
        if self.cleared {
            return Err(MarketError::AlreadyCleared(self.id));
        }

        let player = self.require_player(id_in_group)?;
        match player.activity {
            None => return Err(MarketError::ActivityNotChosen(id_in_group)),
            Some(Activity::Auctioneer) => return Err(MarketError::NotATrader(id_in_group)),
            Some(Activity::Trader) => {}
        }

        let target = self
            .book
            .get_auction(auction)
            .ok_or(MarketError::UnknownAuction(auction))?;

        if price.is_negative() {
            return Err(MarketError::NegativePrice(price));
        }

        // Validate the price that will be stored
        let price = price.round_dp(self.rules.payoff.decimal_places);
        self.check_bid(player, target, price)?;

        let bid = self.book.place_bid(id_in_group, auction, price);
        self.player_mut(id_in_group)?.bid_price = Some(price);

        debug!(group = self.id, player = id_in_group, auction, %price, "bid submitted");
        Ok(bid)
    }

    /// Validation shared by submission and the clearing-time re-check
    fn check_bid(&self, bidder: &Player, auction: &Auction, price: Currency) -> Result<(), MarketError> {
        if auction.auctioneer == bidder.id_in_group {
            return Err(MarketError::OwnAuction {
                player: bidder.id_in_group,
                auction: auction.id,
            });
        }

        let expected = bidder.role.eligible_auction_kind();
        if auction.kind != expected {
            return Err(MarketError::IneligibleAuction {
                player: bidder.id_in_group,
                auction: auction.id,
                kind: auction.kind,
                expected,
            });
        }

        if price.is_negative() {
            return Err(MarketError::NegativePrice(price));
        }

        if self.rules.enforce_reservation
            && !satisfies_reservation(auction.kind, price, bidder.evaluation)
        {
            return Err(MarketError::ReservationViolated {
                price,
                evaluation: bidder.evaluation,
                kind: auction.kind,
            });
        }

        Ok(())
    }

    // ========================================================================
    // Availability
    // ========================================================================

    /// Auctions a trader may bid into: those of the opposite kind to the
    /// trader's role, excluding any auction of their own.
    pub fn available_auctions(&self, id_in_group: u32) -> Result<Vec<&Auction>, MarketError> {
        let player = self.require_player(id_in_group)?;
        let kind = player.role.eligible_auction_kind();
        Ok(self
            .book
            .auctions_of_kind(kind)
            .filter(|a| a.auctioneer != id_in_group)
            .collect())
    }

    /// True if the player has at least one auction to bid into
    pub fn is_auction_available(&self, id_in_group: u32) -> Result<bool, MarketError> {
        Ok(!self.available_auctions(id_in_group)?.is_empty())
    }

    /// The "no auction available" signal.
    ///
    /// - Trader (or undecided player): nothing to bid into
    /// - Auctioneer: the market is cleared and their auction has no winner
    pub fn no_auction_available(&self, id_in_group: u32) -> Result<bool, MarketError> {
        let player = self.require_player(id_in_group)?;
        if player.is_auctioneer() {
            let unsold = self
                .book
                .auction_of(id_in_group)
                .map_or(true, |a| !a.has_winner());
            return Ok(self.cleared && unsold);
        }
        Ok(!self.is_auction_available(id_in_group)?)
    }

    /// Players the group is still waiting for: those who have not chosen,
    /// and traders who could bid but have not.
    pub fn pending_players(&self) -> Vec<u32> {
        self.players
            .iter()
            .filter(|p| match p.activity {
                None => true,
                Some(Activity::Auctioneer) => false,
                Some(Activity::Trader) => {
                    let has_bid = self.book.bid_of(p.id_in_group).map_or(false, Bid::is_complete);
                    !has_bid && self.is_auction_available(p.id_in_group).unwrap_or(false)
                }
            })
            .map(|p| p.id_in_group)
            .collect()
    }

    // ========================================================================
    // Clearing
    // ========================================================================

    /// Resolve every auction in the group, then record which traders won and
    /// at what price each auctioneer sold or bought.
    ///
    /// Bids that no longer pass validation are left out with a warning.
    pub fn clear_market<R>(&mut self, rng: &mut R) -> Result<Vec<(AuctionId, Option<ClearingResult>)>, MarketError>
    where
        R: Rng + ?Sized,
    {
        if self.cleared {
            return Err(MarketError::AlreadyCleared(self.id));
        }

        let auction_ids = self.book.auction_ids();
        let mut results = Vec::with_capacity(auction_ids.len());

        for auction_id in auction_ids {
            let result = {
                let auction = self
                    .book
                    .get_auction(auction_id)
                    .ok_or(MarketError::UnknownAuction(auction_id))?;
                let candidates: Vec<&Bid> = self
                    .book
                    .priced_bids_for(auction_id)
                    .into_iter()
                    .filter(|bid| self.still_valid(auction, bid))
                    .collect();
                select_winner(auction.kind, &candidates, rng)
            };

            match result {
                Some(r) => {
                    self.book.set_winner(auction_id, r.bid)?;
                    info!(
                        group = self.id,
                        auction = auction_id,
                        winner = r.bidder,
                        price = %r.price,
                        tied = r.tied,
                        "auction cleared"
                    );
                }
                None => info!(group = self.id, auction = auction_id, "auction closed without bids"),
            }
            results.push((auction_id, result));
        }

        self.cleared = true;
        self.mark_trader_winners();
        self.dump_winning_prices();

        Ok(results)
    }

    fn still_valid(&self, auction: &Auction, bid: &Bid) -> bool {
        let (Some(bidder), Some(price)) = (self.player(bid.bidder), bid.price) else {
            return false;
        };
        match self.check_bid(bidder, auction, price) {
            Ok(()) => true,
            Err(err) => {
                warn!(group = self.id, bid = bid.id, %err, "bid excluded from clearing");
                false
            }
        }
    }

    fn mark_trader_winners(&mut self) {
        for player in self.players.iter_mut().filter(|p| p.is_trader()) {
            let Some(bid) = self.book.bid_of(player.id_in_group) else {
                continue;
            };
            let Some(auction) = bid.auction.and_then(|id| self.book.get_auction(id)) else {
                continue;
            };
            player.trader_is_winner = Some(auction.winner == Some(bid.id));
        }
    }

    fn dump_winning_prices(&mut self) {
        for player in self.players.iter_mut().filter(|p| p.is_auctioneer()) {
            if let Some(auction) = self.book.auction_of(player.id_in_group) {
                player.auction_price = self.book.winning_bid(auction.id).and_then(|b| b.price);
            }
        }
    }

    // ========================================================================
    // Payoffs
    // ========================================================================

    /// Assign every player's payoff. Requires a cleared market.
    pub fn assign_payoffs(&mut self) -> Result<(), MarketError> {
        if !self.cleared {
            return Err(MarketError::NotCleared(self.id));
        }

        let rule = self.rules.payoff;
        for player in self.players.iter_mut() {
            let payoff = if player.is_auctioneer() {
                let price = self
                    .book
                    .auction_of(player.id_in_group)
                    .and_then(|a| self.book.winning_bid(a.id))
                    .and_then(|b| b.price);
                rule.auctioneer_payoff(player, price)
            } else {
                match self.book.bid_of(player.id_in_group) {
                    Some(bid) => {
                        let won = bid
                            .auction
                            .and_then(|id| self.book.get_auction(id))
                            .map_or(false, |a| a.winner == Some(bid.id));
                        rule.trader_payoff(player, bid.price, won)
                    }
                    None => rule.no_trade,
                }
            };
            player.payoff = Some(payoff);
        }

        let traded = self.players.iter().filter(|p| p.payoff != Some(rule.no_trade)).count();
        info!(group = self.id, players = self.players.len(), traded, "payoffs assigned");
        Ok(())
    }

    /// Export rows for every auction
    pub fn auction_outcomes(&self) -> Vec<AuctionOutcome> {
        self.book
            .auctions()
            .map(|a| {
                let winning = self.book.winning_bid(a.id);
                AuctionOutcome {
                    group_id: self.id,
                    auctioneer: a.auctioneer,
                    kind: a.kind,
                    bid_count: self.book.priced_bids_for(a.id).len(),
                    winner: winning.map(|b| b.bidder),
                    winning_price: winning.and_then(|b| b.price),
                }
            })
            .collect()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AuctionKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn c(v: i64) -> Currency {
        Currency::from_int(v)
    }

    /// Seller E=4 followed by three buyers with high evaluations
    fn selling_group() -> Group {
        let evaluations = [c(4), c(9), c(9), c(9)];
        Group::from_evaluations(1, 1, &evaluations, 0, MarketRules::default())
    }

    #[test]
    fn test_auctioneer_opens_own_kind() {
        let mut group = selling_group();

        let auction = group.choose_activity(1, true).unwrap().unwrap();
        assert_eq!(group.book().get_auction(auction).unwrap().kind, AuctionKind::Selling);

        assert_eq!(group.choose_activity(2, false).unwrap(), None);
        assert_eq!(group.choose_activity(2, true), Err(MarketError::ActivityAlreadyChosen(2)));
        assert_eq!(group.choose_activity(9, true), Err(MarketError::UnknownPlayer(9)));
    }

    #[test]
    fn test_buyer_auctioneer_opens_buying_auction() {
        let mut group = selling_group();
        let auction = group.choose_activity(3, true).unwrap().unwrap();
        assert_eq!(group.book().get_auction(auction).unwrap().kind, AuctionKind::Buying);
    }

    #[test]
    fn test_spec_example_selling_auction() {
        let mut group = selling_group();
        let auction = group.choose_activity(1, true).unwrap().unwrap();
        for (trader, price) in [(2, 5), (3, 5), (4, 7)] {
            group.choose_activity(trader, false).unwrap();
            group.submit_bid(trader, auction, c(price)).unwrap();
        }

        let results = group.clear_market(&mut ChaCha8Rng::seed_from_u64(3)).unwrap();
        let result = results[0].1.unwrap();
        assert_eq!(result.bidder, 4);
        assert_eq!(result.price, c(7));

        group.assign_payoffs().unwrap();
        assert_eq!(group.player(1).unwrap().payoff, Some(c(3)));
        assert_eq!(group.player(1).unwrap().auction_price, Some(c(7)));
        assert_eq!(group.player(4).unwrap().payoff, Some(c(2)));
        assert_eq!(group.player(4).unwrap().trader_is_winner, Some(true));
        assert_eq!(group.player(2).unwrap().payoff, Some(Currency::ZERO));
        assert_eq!(group.player(2).unwrap().trader_is_winner, Some(false));
    }

    #[test]
    fn test_spec_example_buying_auction() {
        // Buyer E=6 runs a buying auction; three sellers with low evaluations
        let evaluations = [c(1), c(2), c(3), c(6)];
        let mut group = Group::from_evaluations(1, 3, &evaluations, 0, MarketRules::default());
        let auction = group.choose_activity(4, true).unwrap().unwrap();
        for (trader, price) in [(1, 3), (2, 4), (3, 4)] {
            group.choose_activity(trader, false).unwrap();
            group.submit_bid(trader, auction, c(price)).unwrap();
        }

        group.clear_market(&mut ChaCha8Rng::seed_from_u64(3)).unwrap();
        group.assign_payoffs().unwrap();

        assert_eq!(group.player(4).unwrap().payoff, Some(c(3)));
        // Winning seller: 3 - 1
        assert_eq!(group.player(1).unwrap().payoff, Some(c(2)));
        assert_eq!(group.player(2).unwrap().payoff, Some(Currency::ZERO));
    }

    #[test]
    fn test_bid_eligibility() {
        let mut group = selling_group();
        let selling = group.choose_activity(1, true).unwrap().unwrap();
        let buying = group.choose_activity(2, true).unwrap().unwrap();
        group.choose_activity(3, false).unwrap();

        // Buyer trader may not bid into a buying auction
        assert_eq!(
            group.submit_bid(3, buying, c(5)),
            Err(MarketError::IneligibleAuction {
                player: 3,
                auction: buying,
                kind: AuctionKind::Buying,
                expected: AuctionKind::Selling,
            })
        );
        assert_eq!(group.submit_bid(2, selling, c(5)), Err(MarketError::NotATrader(2)));
        assert_eq!(group.submit_bid(4, selling, c(5)), Err(MarketError::ActivityNotChosen(4)));
        assert_eq!(group.submit_bid(3, 42, c(5)), Err(MarketError::UnknownAuction(42)));
        assert!(group.submit_bid(3, selling, c(5)).is_ok());
    }

    #[test]
    fn test_bid_price_rules() {
        let mut group = selling_group();
        let auction = group.choose_activity(1, true).unwrap().unwrap();
        group.choose_activity(2, false).unwrap();

        assert_eq!(
            group.submit_bid(2, auction, c(-1)),
            Err(MarketError::NegativePrice(c(-1)))
        );
        assert_eq!(
            group.submit_bid(2, auction, c(10)),
            Err(MarketError::ReservationViolated {
                price: c(10),
                evaluation: c(9),
                kind: AuctionKind::Selling,
            })
        );
        assert!(group.submit_bid(2, auction, c(9)).is_ok());
    }

    #[test]
    fn test_reservation_can_be_disabled() {
        let rules = MarketRules {
            enforce_reservation: false,
            ..MarketRules::default()
        };
        let mut group = Group::from_evaluations(1, 1, &[c(4), c(2)], 0, rules);
        let auction = group.choose_activity(1, true).unwrap().unwrap();
        group.choose_activity(2, false).unwrap();

        group.submit_bid(2, auction, c(6)).unwrap();
        group.clear_market(&mut ChaCha8Rng::seed_from_u64(0)).unwrap();
        group.assign_payoffs().unwrap();

        // Buyer overpays: 2 - 6
        assert_eq!(group.player(2).unwrap().payoff, Some(c(-4)));
    }

    #[test]
    fn test_bid_price_checked_after_rounding() {
        // Seller E=5.004 trades; buyer 2 runs a buying auction
        let evaluation = Currency::from_minor_units(5_004, 3);
        let mut group = Group::from_evaluations(1, 1, &[evaluation, c(9)], 0, MarketRules::default());
        let auction = group.choose_activity(2, true).unwrap().unwrap();
        group.choose_activity(1, false).unwrap();

        // 5.004 is stored as 5.00, below the seller's evaluation
        assert_eq!(
            group.submit_bid(1, auction, Currency::from_minor_units(5_004, 3)),
            Err(MarketError::ReservationViolated {
                price: Currency::from_minor_units(500, 2),
                evaluation,
                kind: AuctionKind::Buying,
            })
        );
        assert!(group.book().bid_of(1).is_none());

        // 5.006 is stored as 5.01 and wins at that price
        group.submit_bid(1, auction, Currency::from_minor_units(5_006, 3)).unwrap();
        let results = group.clear_market(&mut ChaCha8Rng::seed_from_u64(0)).unwrap();
        assert_eq!(
            results[0].1.map(|r| r.price),
            Some(Currency::from_minor_units(501, 2))
        );
    }

    #[test]
    fn test_bid_accepted_when_rounded_price_is_rational() {
        // Buyer E=5 bidding 5.004 into a selling auction is stored as 5.00
        let mut group = Group::from_evaluations(1, 1, &[c(4), c(5)], 0, MarketRules::default());
        let auction = group.choose_activity(1, true).unwrap().unwrap();
        group.choose_activity(2, false).unwrap();

        group.submit_bid(2, auction, Currency::from_minor_units(5_004, 3)).unwrap();
        assert_eq!(group.player(2).unwrap().bid_price, Some(c(5)));
        assert_eq!(group.book().bid_of(2).and_then(|b| b.price), Some(c(5)));
    }

    #[test]
    fn test_tiny_negative_price_rejected_before_rounding() {
        let mut group = selling_group();
        let auction = group.choose_activity(1, true).unwrap().unwrap();
        group.choose_activity(2, false).unwrap();

        let price = Currency::from_minor_units(-4, 3);
        assert_eq!(group.submit_bid(2, auction, price), Err(MarketError::NegativePrice(price)));
    }

    #[test]
    fn test_clearing_skips_bid_failing_recheck() {
        let mut group = selling_group();
        let auction = group.choose_activity(1, true).unwrap().unwrap();
        for trader in 2..=4 {
            group.choose_activity(trader, false).unwrap();
        }
        group.submit_bid(2, auction, c(6)).unwrap();
        group.submit_bid(3, auction, c(8)).unwrap();

        // Stored straight into the book: above buyer 4's evaluation of 9
        group.book.place_bid(4, auction, c(12));

        let results = group.clear_market(&mut ChaCha8Rng::seed_from_u64(0)).unwrap();
        let result = results[0].1.unwrap();
        assert_eq!(result.bidder, 3);
        assert_eq!(result.price, c(8));
        assert_eq!(result.tied, 1);

        group.assign_payoffs().unwrap();
        assert_eq!(group.player(1).unwrap().payoff, Some(c(4)));
        assert_eq!(group.player(4).unwrap().trader_is_winner, Some(false));
        assert_eq!(group.player(4).unwrap().payoff, Some(Currency::ZERO));
    }

    #[test]
    fn test_clearing_with_only_invalid_bids_has_no_winner() {
        let mut group = selling_group();
        let auction = group.choose_activity(1, true).unwrap().unwrap();
        for trader in 2..=4 {
            group.choose_activity(trader, false).unwrap();
        }

        // The auctioneer's own bid never counts
        group.book.place_bid(1, auction, c(7));

        let results = group.clear_market(&mut ChaCha8Rng::seed_from_u64(0)).unwrap();
        assert_eq!(results, vec![(auction, None)]);
        assert!(!group.book().get_auction(auction).unwrap().has_winner());

        group.assign_payoffs().unwrap();
        assert!(group.no_auction_available(1).unwrap());
        assert_eq!(group.player(1).unwrap().payoff, Some(Currency::ZERO));
    }

    #[test]
    fn test_from_evaluations_numbers_players_in_order() {
        let evaluations = [c(1), c(2), c(3), c(4), c(5)];
        let group = Group::from_evaluations(3, 2, &evaluations, 10, MarketRules::default());

        for (i, player) in group.players().iter().enumerate() {
            let id = i as u32 + 1;
            assert_eq!(player.id_in_group, id);
            assert_eq!(player.participant_id, 10 + i as u64);
            assert_eq!(player.group_id, 3);
            assert_eq!(group.player(id).unwrap().evaluation, evaluations[i]);
        }
        assert!(group.player(0).is_none());
        assert!(group.player(6).is_none());
        assert_eq!(group.player(2).unwrap().role, Role::Seller);
        assert_eq!(group.player(3).unwrap().role, Role::Buyer);
    }

    #[test]
    fn test_rebid_updates_single_bid() {
        let mut group = selling_group();
        let auction = group.choose_activity(1, true).unwrap().unwrap();
        group.choose_activity(2, false).unwrap();

        let first = group.submit_bid(2, auction, c(5)).unwrap();
        let second = group.submit_bid(2, auction, c(6)).unwrap();
        assert_eq!(first, second);
        assert_eq!(group.book().bid_count(), 1);
        assert_eq!(group.player(2).unwrap().bid_price, Some(c(6)));
    }

    #[test]
    fn test_available_auctions_are_counter_side() {
        let evaluations = [c(2), c(3), c(8), c(9)];
        let mut group = Group::from_evaluations(1, 2, &evaluations, 0, MarketRules::default());
        let selling = group.choose_activity(1, true).unwrap().unwrap();
        let buying = group.choose_activity(3, true).unwrap().unwrap();

        let for_seller: Vec<AuctionId> =
            group.available_auctions(2).unwrap().iter().map(|a| a.id).collect();
        let for_buyer: Vec<AuctionId> =
            group.available_auctions(4).unwrap().iter().map(|a| a.id).collect();

        assert_eq!(for_seller, vec![buying]);
        assert_eq!(for_buyer, vec![selling]);
    }

    #[test]
    fn test_no_auction_available_for_trader() {
        let mut group = selling_group();
        group.choose_activity(2, false).unwrap();

        assert!(group.no_auction_available(2).unwrap());
        assert!(!group.is_auction_available(2).unwrap());

        group.choose_activity(1, true).unwrap();
        assert!(!group.no_auction_available(2).unwrap());
    }

    #[test]
    fn test_no_auction_available_for_unsold_auctioneer() {
        let mut group = selling_group();
        group.choose_activity(1, true).unwrap();
        for trader in 2..=4 {
            group.choose_activity(trader, false).unwrap();
        }

        // Not signalled before clearing
        assert!(!group.no_auction_available(1).unwrap());

        group.clear_market(&mut ChaCha8Rng::seed_from_u64(0)).unwrap();
        group.assign_payoffs().unwrap();

        assert!(group.no_auction_available(1).unwrap());
        assert_eq!(group.player(1).unwrap().payoff, Some(Currency::ZERO));
        assert_eq!(group.player(1).unwrap().auction_price, None);
    }

    #[test]
    fn test_clear_exactly_once() {
        let mut group = selling_group();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        group.clear_market(&mut rng).unwrap();

        assert_eq!(group.clear_market(&mut rng).unwrap_err(), MarketError::AlreadyCleared(1));
        assert_eq!(group.choose_activity(1, true), Err(MarketError::AlreadyCleared(1)));
    }

    #[test]
    fn test_payoffs_require_clearing() {
        let mut group = selling_group();
        assert_eq!(group.assign_payoffs(), Err(MarketError::NotCleared(1)));
    }

    #[test]
    fn test_pending_players() {
        let mut group = selling_group();
        assert_eq!(group.pending_players(), vec![1, 2, 3, 4]);

        // Traders without any auction to bid into are not waited for
        for trader in 2..=4 {
            group.choose_activity(trader, false).unwrap();
        }
        assert_eq!(group.pending_players(), vec![1]);

        let auction = group.choose_activity(1, true).unwrap().unwrap();
        assert_eq!(group.pending_players(), vec![2, 3, 4]);

        for trader in 2..=4 {
            group.submit_bid(trader, auction, c(6)).unwrap();
        }
        assert!(group.pending_players().is_empty());
    }

    #[test]
    fn test_auction_outcomes() {
        let mut group = selling_group();
        let auction = group.choose_activity(1, true).unwrap().unwrap();
        group.choose_activity(2, false).unwrap();
        group.submit_bid(2, auction, c(8)).unwrap();
        group.clear_market(&mut ChaCha8Rng::seed_from_u64(0)).unwrap();

        let outcomes = group.auction_outcomes();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].bid_count, 1);
        assert_eq!(outcomes[0].winner, Some(2));
        assert_eq!(outcomes[0].winning_price, Some(c(8)));
    }
}
