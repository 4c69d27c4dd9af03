//! Deterministic random number generation
//!
//! Seeded xorshift64* generator used by the obligation generator.
//! The solvers never draw random numbers; nothing in this crate reads OS or
//! thread-local randomness.

mod xorshift;

pub use xorshift::RngManager;
