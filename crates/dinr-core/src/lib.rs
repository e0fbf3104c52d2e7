//! # dinr-core
//!
//! Core types, typed ids, and error types for dinr.
//!
//! This crate provides the foundational types shared across all dinr crates:
//! - Entity structs for dining options, voting sessions, groups and users
//! - Positive integer id newtypes
//! - Lock scopes reported by the voting engine
//! - Cross-cutting error types (`VotingError`, `StorageError`, `InvalidInput`)
//! - Input normalisation helpers used by every write path

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod validate;
