//! # dinr-engine
//!
//! The voting engine: business rules layered over three store contracts.
//!
//! - [`store`] defines the contracts (`OptionStore`, `SessionStore`,
//!   `GlobalLockStore`) that persistence adapters implement.
//! - [`rules`] holds the pure rules: the clamped vote delta, the dual-scope lock
//!   predicate, and the ranking order used for winner selection.
//! - [`engine`] wires the rules to the stores in `VotingEngine`.
//! - [`retry`] bounds the compare-and-swap loop that serializes votes per option.
//! - [`memory`] provides in-process store adapters.
//!
//! The engine keeps no process-wide state: everything it knows comes from the
//! store handles passed to [`VotingEngine::new`].

pub mod engine;
pub mod memory;
pub mod retry;
pub mod rules;
pub mod store;

pub use engine::VotingEngine;
pub use retry::RetryConfig;
pub use store::{GlobalLockStore, OptionStore, SessionStore};
