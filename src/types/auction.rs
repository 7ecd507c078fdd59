//! Auctions opened by auctioneers.

use crate::types::{AuctionId, AuctionKind, BidId, GroupId};

/// One market opened by an auctioneer.
///
/// ## Invariants
///
/// - One auction per auctioneer (enforced by [`AuctionBook`](crate::market::AuctionBook))
/// - `winner`, when set, is the id of a bid placed into this auction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Auction {
    /// Key in the owning book
    pub id: AuctionId,

    /// Selling (highest bid wins) or buying (lowest bid wins)
    pub kind: AuctionKind,

    /// Market this auction belongs to
    pub group_id: GroupId,

    /// `id_in_group` of the player who opened it
    pub auctioneer: u32,

    /// Winning bid; `None` until cleared, and stays `None` without bids
    pub winner: Option<BidId>,
}

impl Auction {
    pub fn new(id: AuctionId, kind: AuctionKind, group_id: GroupId, auctioneer: u32) -> Self {
        Self {
            id,
            kind,
            group_id,
            auctioneer,
            winner: None,
        }
    }

    /// True once a winning bid has been recorded
    #[inline]
    pub fn has_winner(&self) -> bool {
        self.winner.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auction_new() {
        let a = Auction::new(0, AuctionKind::Selling, 3, 1);
        assert_eq!(a.kind, AuctionKind::Selling);
        assert!(!a.has_winner());
        assert_eq!(a.auctioneer, 1);
        assert_eq!(a.group_id, 3);
    }
}
