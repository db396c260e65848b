//! bookcheck-core - Test-data lifecycle for the Library API harness
//!
//! This crate provides:
//! - Synthetic book records (`generator`)
//! - The shared identifier store and the dependent-phase feed
//! - Soft assertions that report every failed check at once
//! - Error types shared by the harness

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod assertions;
pub mod book;
pub mod error;
pub mod feed;
pub mod generator;
pub mod store;

pub use assertions::{SoftAssertions, ValidationFailure};
pub use book::{BookInput, Identifier};
pub use error::{Error, Result};
pub use feed::DependentFeed;
pub use generator::{generate, generate_with, BookSource, RandomBookSource};
pub use store::IdentifierStore;
