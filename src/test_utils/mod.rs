//! Test utilities.
//!
//! This module provides:
//! - Fixture factories for users, credentials and seeded token stores
//! - In-memory implementations of the auth gateway and notifier ports

mod auth_mocks;
mod factories;

pub use auth_mocks::*;
pub use factories::*;
