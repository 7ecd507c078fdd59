//! Market module: per-group storage and round logic.
//!
//! ## Components
//!
//! - [`AuctionBook`]: slab-backed auctions and bids of one group
//! - [`Group`]: players plus their book; activity choice, bidding,
//!   eligibility, clearing and payoffs
//! - [`MarketRules`]: session-wide parameters applied by every group
//!
//! ## Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use volauction::market::{Group, MarketRules};
//! use volauction::types::Currency;
//!
//! // One seller (E=4) and two buyers
//! let evaluations = [4, 9, 8].map(Currency::from_int);
//! let mut group = Group::from_evaluations(1, 1, &evaluations, 0, MarketRules::default());
//!
//! let auction = group.choose_activity(1, true).unwrap().unwrap();
//! group.choose_activity(2, false).unwrap();
//! group.choose_activity(3, false).unwrap();
//! group.submit_bid(2, auction, Currency::from_int(6)).unwrap();
//! group.submit_bid(3, auction, Currency::from_int(7)).unwrap();
//!
//! group.clear_market(&mut ChaCha8Rng::seed_from_u64(1)).unwrap();
//! group.assign_payoffs().unwrap();
//!
//! assert_eq!(group.player(1).unwrap().payoff, Some(Currency::from_int(3)));
//! ```

pub mod book;
pub mod group;

pub use book::AuctionBook;
pub use group::{Group, MarketRules};
