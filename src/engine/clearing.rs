//! Auction clearing.
//!
//! ## Rules
//!
//! - Only bids carrying a price take part
//! - **Selling** auctions: the highest price wins (the seller wants the best offer)
//! - **Buying** auctions: the lowest price wins (the buyer wants the cheapest offer)
//! - No priced bids: no winner
//! - Ties at the winning price are broken uniformly at random with the
//!   caller's RNG, so submission order never matters
//!
//! The functions here are pure: they pick a winner but do not record it.
//! [`Group::clear_market`](crate::market::Group::clear_market) writes the
//! result back exactly once per auction.
//!
//! ## Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use volauction::engine::clearing::select_winner;
//! use volauction::types::{AuctionKind, Bid, Currency};
//!
//! let mut bids = vec![Bid::new(0, 2), Bid::new(1, 3), Bid::new(2, 4)];
//! for (bid, price) in bids.iter_mut().zip([5, 5, 7]) {
//!     bid.place(0, Currency::from_int(price));
//! }
//! let refs: Vec<&Bid> = bids.iter().collect();
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let result = select_winner(AuctionKind::Selling, &refs, &mut rng).unwrap();
//! assert_eq!(result.price, Currency::from_int(7));
//! assert_eq!(result.bidder, 4);
//! ```

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{AuctionKind, Bid, BidId, Currency};

/// Outcome of clearing one auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearingResult {
    /// Winning bid
    pub bid: BidId,

    /// `id_in_group` of the winning trader
    pub bidder: u32,

    /// Winning price
    pub price: Currency,

    /// How many bids shared the winning price (1 = no tie)
    pub tied: usize,
}

/// Best price among `bids`: the maximum for selling auctions, the minimum
/// for buying auctions. `None` when no bid carries a price.
pub fn winning_price<'a, I>(kind: AuctionKind, bids: I) -> Option<Currency>
where
    I: IntoIterator<Item = &'a Bid>,
{
    let prices = bids.into_iter().filter_map(|b| b.price);
    match kind {
        AuctionKind::Selling => prices.max(),
        AuctionKind::Buying => prices.min(),
    }
}

/// Bids offering exactly `price`
pub fn tied_at<'a>(bids: &[&'a Bid], price: Currency) -> Vec<&'a Bid> {
    bids.iter()
        .copied()
        .filter(|b| b.price == Some(price))
        .collect()
}

/// Pick the winning bid, drawing uniformly among ties with `rng`.
///
/// Calling this twice on tied bids may return different winners; callers
/// must clear each auction once.
pub fn select_winner<R>(kind: AuctionKind, bids: &[&Bid], rng: &mut R) -> Option<ClearingResult>
where
    R: Rng + ?Sized,
{
    let price = winning_price(kind, bids.iter().copied())?;
    let tied = tied_at(bids, price);
    let winner = tied.choose(rng)?;

    Some(ClearingResult {
        bid: winner.id,
        bidder: winner.bidder,
        price,
        tied: tied.len(),
    })
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn make_bids(prices: &[i64]) -> Vec<Bid> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let mut bid = Bid::new(i, i as u32 + 2);
                bid.place(0, Currency::from_int(p));
                bid
            })
            .collect()
    }

    #[test]
    fn test_selling_takes_maximum() {
        let bids = make_bids(&[5, 5, 7]);
        let refs: Vec<&Bid> = bids.iter().collect();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let result = select_winner(AuctionKind::Selling, &refs, &mut rng).unwrap();
        assert_eq!(result.price, Currency::from_int(7));
        assert_eq!(result.bid, 2);
        assert_eq!(result.tied, 1);
    }

    #[test]
    fn test_buying_takes_minimum() {
        let bids = make_bids(&[3, 4, 4]);
        let refs: Vec<&Bid> = bids.iter().collect();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let result = select_winner(AuctionKind::Buying, &refs, &mut rng).unwrap();
        assert_eq!(result.price, Currency::from_int(3));
        assert_eq!(result.bid, 0);
    }

    #[test]
    fn test_no_bids_no_winner() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(select_winner(AuctionKind::Selling, &[], &mut rng).is_none());
        assert!(winning_price(AuctionKind::Buying, std::iter::empty()).is_none());
    }

    #[test]
    fn test_unpriced_bids_are_ignored() {
        let mut bids = make_bids(&[4]);
        bids.push(Bid::new(1, 9));
        let refs: Vec<&Bid> = bids.iter().collect();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        // An unpriced bid must not win a buying auction as a "zero" price
        let result = select_winner(AuctionKind::Buying, &refs, &mut rng).unwrap();
        assert_eq!(result.bid, 0);

        let unpriced = [Bid::new(0, 2)];
        let refs: Vec<&Bid> = unpriced.iter().collect();
        assert!(select_winner(AuctionKind::Selling, &refs, &mut rng).is_none());
    }

    #[test]
    fn test_zero_price_can_win() {
        let bids = make_bids(&[0, 2]);
        let refs: Vec<&Bid> = bids.iter().collect();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let result = select_winner(AuctionKind::Buying, &refs, &mut rng).unwrap();
        assert_eq!(result.price, Currency::ZERO);
    }

    #[test]
    fn test_tie_reports_count_and_stays_in_tie_set() {
        let bids = make_bids(&[6, 8, 8, 8]);
        let refs: Vec<&Bid> = bids.iter().collect();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..100 {
            let result = select_winner(AuctionKind::Selling, &refs, &mut rng).unwrap();
            assert_eq!(result.tied, 3);
            assert!((1..=3).contains(&result.bid));
        }
    }

    #[test]
    fn test_same_seed_same_winner() {
        let bids = make_bids(&[5, 5, 5, 5, 5]);
        let refs: Vec<&Bid> = bids.iter().collect();

        let a = select_winner(AuctionKind::Buying, &refs, &mut ChaCha8Rng::seed_from_u64(99));
        let b = select_winner(AuctionKind::Buying, &refs, &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_tied_at() {
        let bids = make_bids(&[1, 2, 2]);
        let refs: Vec<&Bid> = bids.iter().collect();
        assert_eq!(tied_at(&refs, Currency::from_int(2)).len(), 2);
        assert!(tied_at(&refs, Currency::from_int(3)).is_empty());
    }
}
