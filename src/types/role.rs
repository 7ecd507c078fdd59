//! Market roles and the sides they imply.
//!
//! A player's [`Role`] is fixed for the round. It determines:
//!
//! - which [`AuctionKind`] the player opens when acting as auctioneer
//!   (sellers open selling auctions, buyers open buying auctions)
//! - which kind the player may bid into when acting as trader (the opposite)
//! - the payoff [`Direction`] (+1 for sellers, -1 for buyers)

use serde::{Deserialize, Serialize};

use crate::types::currency::Currency;

// ============================================================================
// Role
// ============================================================================

/// Fixed role of a player within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Owns the good, profits from a high price
    Seller,
    /// Wants the good, profits from a low price
    Buyer,
}

impl Role {
    /// Role from the stable 1-based position in the group.
    ///
    /// The first `num_sellers` positions are sellers.
    ///
    /// ```
    /// use volauction::types::Role;
    ///
    /// assert_eq!(Role::from_id_in_group(1, 1), Role::Seller);
    /// assert_eq!(Role::from_id_in_group(2, 1), Role::Buyer);
    /// ```
    pub fn from_id_in_group(id_in_group: u32, num_sellers: u32) -> Self {
        if id_in_group <= num_sellers {
            Role::Seller
        } else {
            Role::Buyer
        }
    }

    /// Kind of auction this role opens as auctioneer
    pub fn auction_kind(self) -> AuctionKind {
        match self {
            Role::Seller => AuctionKind::Selling,
            Role::Buyer => AuctionKind::Buying,
        }
    }

    /// Kind of auction this role may bid into as trader
    pub fn eligible_auction_kind(self) -> AuctionKind {
        self.auction_kind().opposite()
    }

    /// Payoff sign for this role
    pub fn direction(self) -> Direction {
        match self {
            Role::Seller => Direction::Seller,
            Role::Buyer => Direction::Buyer,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Role::Seller => Role::Buyer,
            Role::Buyer => Role::Seller,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Seller => "Seller",
            Role::Buyer => "Buyer",
        }
    }
}

// ============================================================================
// AuctionKind
// ============================================================================

/// Direction of an auction.
///
/// - `Selling`: the auctioneer sells, the highest bid wins
/// - `Buying`: the auctioneer buys, the lowest bid wins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuctionKind {
    Selling,
    Buying,
}

impl AuctionKind {
    pub fn opposite(self) -> Self {
        match self {
            AuctionKind::Selling => AuctionKind::Buying,
            AuctionKind::Buying => AuctionKind::Selling,
        }
    }
}

// ============================================================================
// Activity
// ============================================================================

/// What a player chose to do this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activity {
    /// Organizes an auction
    Auctioneer,
    /// Participates in someone else's auction
    Trader,
}

impl Activity {
    pub fn from_choice(is_auctioneer: bool) -> Self {
        if is_auctioneer {
            Activity::Auctioneer
        } else {
            Activity::Trader
        }
    }

    #[inline]
    pub fn is_auctioneer(self) -> bool {
        self == Activity::Auctioneer
    }
}

// ============================================================================
// Direction
// ============================================================================

/// Payoff sign: +1 for sellers, -1 for buyers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Seller,
    Buyer,
}

impl Direction {
    /// Apply the sign to an amount
    pub fn apply(self, amount: Currency) -> Currency {
        match self {
            Direction::Seller => amount,
            Direction::Buyer => -amount,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
