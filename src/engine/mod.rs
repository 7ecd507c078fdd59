//! Clearing and payoff engine.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: clearing picks a winner, it does not store one
//! 2. **Decimal math**: prices and payoffs are [`Currency`](crate::types::Currency)
//! 3. **Injected randomness**: tie-breaks draw from a caller-supplied `rand::Rng`
//!
//! ## Clearing Rules
//!
//! - **Selling auctions**: highest price wins
//! - **Buying auctions**: lowest price wins
//! - **Ties**: uniformly random among the tied bids
//! - **No priced bids**: no winner
//!
//! ## Payoff Rules
//!
//! - Traded: `direction * (price - evaluation)`, +1 seller / -1 buyer
//! - Did not trade: the no-trade baseline

pub mod clearing;
pub mod payoff;

pub use clearing::{select_winner, winning_price, ClearingResult};
pub use payoff::{satisfies_reservation, trade_payoff, PayoffRule};
