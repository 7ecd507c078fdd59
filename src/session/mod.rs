//! Session lifecycle: configuration, group formation and round resolution.
//!
//! ## Components
//!
//! - [`SessionConfig`] / [`Settings`]: validated session parameters
//! - [`ConfigSource`]: host-side key/value config, abstracted
//! - [`Barrier`]: host-side "everyone is done" synchronization, abstracted
//! - [`Session`]: creates groups and players, resolves each group once

pub mod barrier;
pub mod config;
pub mod round;

pub use barrier::{Barrier, SubmissionBarrier};
pub use config::{ConfigSource, SessionConfig, Settings};
pub use round::{draw_evaluation, Session};
