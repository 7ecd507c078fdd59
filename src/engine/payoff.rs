//! Payoff computation.
//!
//! A player who traded earns `direction * (price - evaluation)`:
//!
//! - sellers (+1): `price - evaluation`
//! - buyers (-1): `evaluation - price`
//!
//! Everyone else earns the configured no-trade baseline. For an auctioneer
//! "traded" means their auction found a winner; for a trader it means their
//! own bid is that winner.

use crate::types::{AuctionKind, Currency, Direction, Player};

/// Profit from trading one unit at `price`
pub fn trade_payoff(direction: Direction, price: Currency, evaluation: Currency) -> Currency {
    direction.apply(price - evaluation)
}

/// Whether a bid at `price` is individually rational for a bidder valuing
/// the good at `evaluation`.
///
/// - Selling auction (bidder buys): `price <= evaluation`
/// - Buying auction (bidder sells): `price >= evaluation`
pub fn satisfies_reservation(kind: AuctionKind, price: Currency, evaluation: Currency) -> bool {
    match kind {
        AuctionKind::Selling => price <= evaluation,
        AuctionKind::Buying => price >= evaluation,
    }
}

/// Session-level payoff parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayoffRule {
    /// Earnings when no trade happened
    pub no_trade: Currency,

    /// Payoffs are rounded to this many fractional digits
    pub decimal_places: u32,
}

impl Default for PayoffRule {
    fn default() -> Self {
        Self {
            no_trade: Currency::ZERO,
            decimal_places: crate::types::currency::DEFAULT_DECIMAL_PLACES,
        }
    }
}

impl PayoffRule {
    pub fn new(no_trade: Currency, decimal_places: u32) -> Self {
        Self {
            no_trade,
            decimal_places,
        }
    }

    /// Payoff for `player` given the price they traded at, if any
    pub fn payoff(&self, player: &Player, traded_at: Option<Currency>) -> Currency {
        match traded_at {
            Some(price) => player.trade_payoff(price).round_dp(self.decimal_places),
            None => self.no_trade,
        }
    }

    /// Auctioneer payoff: `winning_price` is `None` for an auction nobody won
    /// (or a player who never opened one)
    pub fn auctioneer_payoff(&self, auctioneer: &Player, winning_price: Option<Currency>) -> Currency {
        self.payoff(auctioneer, winning_price)
    }

    /// Trader payoff: trades only if the trader's own bid won
    pub fn trader_payoff(
        &self,
        trader: &Player,
        bid_price: Option<Currency>,
        bid_won: bool,
    ) -> Currency {
        self.payoff(trader, bid_price.filter(|_| bid_won))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    fn c(v: i64) -> Currency {
        Currency::from_int(v)
    }

    #[test]
    fn test_trade_payoff() {
        assert_eq!(trade_payoff(Direction::Seller, c(7), c(4)), c(3));
        assert_eq!(trade_payoff(Direction::Buyer, c(3), c(6)), c(3));
        assert_eq!(trade_payoff(Direction::Buyer, c(8), c(6)), c(-2));
    }

    #[test]
    fn test_auctioneer_payoff() {
        let rule = PayoffRule::default();
        let seller = Player::new(1, 1, 1, Role::Seller, c(4));

        assert_eq!(rule.auctioneer_payoff(&seller, Some(c(7))), c(3));
        assert_eq!(rule.auctioneer_payoff(&seller, None), Currency::ZERO);
    }

    #[test]
    fn test_trader_payoff_requires_win() {
        let rule = PayoffRule::new(c(1), 2);
        let buyer = Player::new(2, 1, 2, Role::Buyer, c(9));

        assert_eq!(rule.trader_payoff(&buyer, Some(c(7)), true), c(2));
        assert_eq!(rule.trader_payoff(&buyer, Some(c(7)), false), c(1));
        assert_eq!(rule.trader_payoff(&buyer, None, false), c(1));
    }

    #[test]
    fn test_payoff_rounding() {
        let rule = PayoffRule::new(Currency::ZERO, 1);
        let seller = Player::new(1, 1, 1, Role::Seller, Currency::from_minor_units(412, 2));
        // 7.00 - 4.12 = 2.88 -> 2.9
        assert_eq!(
            rule.payoff(&seller, Some(c(7))),
            Currency::from_minor_units(29, 1)
        );
    }

    #[test]
    fn test_satisfies_reservation() {
        assert!(satisfies_reservation(AuctionKind::Selling, c(5), c(5)));
        assert!(!satisfies_reservation(AuctionKind::Selling, c(6), c(5)));
        assert!(satisfies_reservation(AuctionKind::Buying, c(6), c(5)));
        assert!(!satisfies_reservation(AuctionKind::Buying, c(4), c(5)));
    }
}
