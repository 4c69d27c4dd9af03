//! Domain models for debt settlement

pub mod balance;
pub mod obligation;

// Re-exports
pub use balance::{BalanceError, NetBalances};
pub use obligation::Obligation;
