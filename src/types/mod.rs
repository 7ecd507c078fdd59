//! Core data types for the endogenous market formation game.
//!
//! ## Types
//!
//! - [`Currency`]: Decimal amount of experimental points
//! - [`Role`], [`AuctionKind`], [`Activity`], [`Direction`]: who does what
//! - [`Player`]: A participant in one round
//! - [`Auction`]: A market opened by an auctioneer
//! - [`Bid`]: A trader's offer into an auction
//! - [`RoundRecord`], [`RoundReceipt`]: Export and fingerprint of a round
//!
//! ## Identifiers
//!
//! Auctions and bids are keyed by their slot in the group's
//! [`AuctionBook`](crate::market::AuctionBook). Players are addressed by
//! their 1-based `id_in_group` inside a group.

pub mod currency;
mod role;
mod player;
mod auction;
mod bid;
mod record;

pub use currency::Currency;
pub use role::{Activity, AuctionKind, Direction, Role};
pub use player::Player;
pub use auction::Auction;
pub use bid::Bid;
pub use record::{AuctionOutcome, PlayerOutcome, RoundReceipt, RoundRecord};

/// Session-wide participant identifier
pub type ParticipantId = u64;

/// Group (market) identifier, 1-based
pub type GroupId = u32;

/// Auction key within a group's book
pub type AuctionId = usize;

/// Bid key within a group's book
pub type BidId = usize;
