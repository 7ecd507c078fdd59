//! # volauction
//!
//! Endogenous market formation: players are split into buyers and sellers,
//! each decides whether to run an auction or trade in someone else's, and
//! payoffs follow from the auction outcomes.
//!
//! ## Architecture
//!
//! - **Types**: Core data (Currency, Role, Player, Auction, Bid, RoundRecord)
//! - **Market**: Per-group auction book and round logic
//! - **Engine**: Auction clearing and payoff rules
//! - **Session**: Configuration, group formation, barrier and resolution
//!
//! ## Design Principles
//!
//! 1. **No Floating Point**: All currency math uses `rust_decimal`
//! 2. **Explicit Absence**: "no bid", "no auction", "no winner" are `Option`s
//! 3. **Injected Randomness**: Every draw takes a caller-supplied `rand::Rng`
//! 4. **Clear Once**: A group's market is resolved exactly once per round
//!
//! ## Round
//!
//! ```text
//! role assignment -> activity choice -> open auction | bid
//!   -> barrier -> clearing -> payoffs -> results
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types
pub mod types;

/// Error enums
pub mod error;

/// Auction book and group logic
pub mod market;

/// Clearing and payoff rules
pub mod engine;

/// Session configuration and lifecycle
pub mod session;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use types::{
    Activity, Auction, AuctionKind, Bid, Currency, Direction, Player, Role, RoundReceipt,
    RoundRecord,
};
pub use error::{ConfigError, MarketError, SessionError};
pub use market::{AuctionBook, Group, MarketRules};
pub use engine::{ClearingResult, PayoffRule};
pub use session::{Barrier, Session, SessionConfig, Settings, SubmissionBarrier};
