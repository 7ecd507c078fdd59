//! Bids submitted by traders.

use crate::types::{AuctionId, BidId, Currency};

/// A trader's single bid for the round.
///
/// The row exists from the moment the trader opens the bid form, before an
/// auction or price is chosen, so both are optional. Clearing only looks at
/// bids that carry a price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bid {
    /// Key in the owning book
    pub id: BidId,

    /// Auction the bid was placed into
    pub auction: Option<AuctionId>,

    /// `id_in_group` of the trader
    pub bidder: u32,

    /// Offered price (non-negative)
    pub price: Option<Currency>,
}

impl Bid {
    /// An empty bid for `bidder`
    pub fn new(id: BidId, bidder: u32) -> Self {
        Self {
            id,
            auction: None,
            bidder,
            price: None,
        }
    }

    /// Point the bid at `auction` with `price`
    pub fn place(&mut self, auction: AuctionId, price: Currency) {
        self.auction = Some(auction);
        self.price = Some(price);
    }

    /// True if the bid names an auction and a price
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.auction.is_some() && self.price.is_some()
    }
}
