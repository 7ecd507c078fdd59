//! Auction book: storage for one group's auctions and bids.
//!
//! ## Architecture
//!
//! - **Slab**: auctions and bids live in two slabs; the slab key is the id
//! - **HashMap**: auctioneer -> auction and bidder -> bid indexes enforce
//!   "one auction per auctioneer" and "one bid per bidder"
//!
//! The book stores whatever it is given. Eligibility and price rules are
//! checked one level up, in [`Group`](crate::market::Group).
//!
//! ## Example
//!
//! ```
//! use volauction::market::AuctionBook;
//! use volauction::types::{AuctionKind, Currency};
//!
//! let mut book = AuctionBook::with_capacity(3);
//! let auction = book.open_auction(AuctionKind::Selling, 1, 1).unwrap();
//!
//! book.place_bid(2, auction, Currency::from_int(5));
//! book.place_bid(3, auction, Currency::from_int(7));
//!
//! assert_eq!(book.priced_bids_for(auction).len(), 2);
//! ```

use std::collections::HashMap;

use slab::Slab;

use crate::error::MarketError;
use crate::types::{Auction, AuctionId, AuctionKind, Bid, BidId, Currency, GroupId};

/// Auctions and bids of a single group.
#[derive(Debug, Default)]
pub struct AuctionBook {
    auctions: Slab<Auction>,
    bids: Slab<Bid>,

    /// Auctioneer `id_in_group` -> auction key
    auction_index: HashMap<u32, AuctionId>,

    /// Bidder `id_in_group` -> bid key
    bid_index: HashMap<u32, BidId>,
}

impl AuctionBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for a group of `group_size` players
    pub fn with_capacity(group_size: usize) -> Self {
        Self {
            auctions: Slab::with_capacity(group_size),
            bids: Slab::with_capacity(group_size),
            auction_index: HashMap::with_capacity(group_size),
            bid_index: HashMap::with_capacity(group_size),
        }
    }

    // ========================================================================
    // Size
    // ========================================================================

    #[inline]
    pub fn bid_count(&self) -> usize {
        self.bids.len()
    }


    // ========================================================================
    // Auctions
    // ========================================================================

    /// Open an auction owned by `auctioneer`.
    ///
    /// # Errors
    ///
    /// [`MarketError::AuctionAlreadyOpen`] if the auctioneer already has one.
    pub fn open_auction(
        &mut self,
        kind: AuctionKind,
        group_id: GroupId,
        auctioneer: u32,
    ) -> Result<AuctionId, MarketError> {
        if self.auction_index.contains_key(&auctioneer) {
            return Err(MarketError::AuctionAlreadyOpen(auctioneer));
        }

        let entry = self.auctions.vacant_entry();
        let id = entry.key();
        entry.insert(Auction::new(id, kind, group_id, auctioneer));
        self.auction_index.insert(auctioneer, id);

        Ok(id)
    }

    #[inline]
    pub fn get_auction(&self, id: AuctionId) -> Option<&Auction> {
        self.auctions.get(id)
    }

    /// The auction run by `auctioneer`, if any
    pub fn auction_of(&self, auctioneer: u32) -> Option<&Auction> {
        let id = *self.auction_index.get(&auctioneer)?;
        self.auctions.get(id)
    }

    /// All auctions in opening order
    pub fn auctions(&self) -> impl Iterator<Item = &Auction> {
        self.auctions.iter().map(|(_, a)| a)
    }

    /// Auctions of one kind
    pub fn auctions_of_kind(&self, kind: AuctionKind) -> impl Iterator<Item = &Auction> {
        self.auctions().filter(move |a| a.kind == kind)
    }

    /// Keys of all auctions
    pub fn auction_ids(&self) -> Vec<AuctionId> {
        self.auctions.iter().map(|(id, _)| id).collect()
    }

    /// Record `bid` as the winner of `auction`.
    ///
    /// # Errors
    ///
    /// - [`MarketError::UnknownAuction`] if the auction does not exist
    /// - [`MarketError::ForeignBid`] if the bid was not placed into it
    pub fn set_winner(&mut self, auction: AuctionId, bid: BidId) -> Result<(), MarketError> {
        let placed_here = self
            .bids
            .get(bid)
            .map_or(false, |b| b.auction == Some(auction));

        let entry = self
            .auctions
            .get_mut(auction)
            .ok_or(MarketError::UnknownAuction(auction))?;

        if !placed_here {
            return Err(MarketError::ForeignBid { auction, bid });
        }

        entry.winner = Some(bid);
        Ok(())
    }

    /// The winning bid of `auction`, if it has one
    pub fn winning_bid(&self, auction: AuctionId) -> Option<&Bid> {
        let winner = self.auctions.get(auction)?.winner?;
        self.bids.get(winner)
    }

    // ========================================================================
    // Bids
    // ========================================================================

    /// The bid row of `bidder`, created empty on first access
    pub fn bid_entry(&mut self, bidder: u32) -> BidId {
        if let Some(&id) = self.bid_index.get(&bidder) {
            return id;
        }

        let entry = self.bids.vacant_entry();
        let id = entry.key();
        entry.insert(Bid::new(id, bidder));
        self.bid_index.insert(bidder, id);
        id
    }

    /// Create or update `bidder`'s bid
    pub fn place_bid(&mut self, bidder: u32, auction: AuctionId, price: Currency) -> BidId {
        let id = self.bid_entry(bidder);
        self.bids[id].place(auction, price);
        id
    }

    /// The bid of `bidder`, if any
    pub fn bid_of(&self, bidder: u32) -> Option<&Bid> {
        let id = *self.bid_index.get(&bidder)?;
        self.bids.get(id)
    }

    /// Every bid placed into `auction`
    pub fn bids_for(&self, auction: AuctionId) -> impl Iterator<Item = &Bid> {
        self.bids
            .iter()
            .map(|(_, b)| b)
            .filter(move |b| b.auction == Some(auction))
    }

    /// Bids placed into `auction` that carry a price
    pub fn priced_bids_for(&self, auction: AuctionId) -> Vec<&Bid> {
        self.bids_for(auction).filter(|b| b.price.is_some()).collect()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
