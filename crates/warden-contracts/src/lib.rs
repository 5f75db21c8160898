//! # warden-contracts
//!
//! Shared types, token parsing, and error types for warden.
//!
//! Every crate in the workspace imports from here. There is no authorization
//! logic in this crate, only identity data, the delimited-argument splitter,
//! and the error enum.

pub mod error;
pub mod principal;
pub mod tokens;
