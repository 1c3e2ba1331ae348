//! Credential codec
//!
//! One-way, salted, tunable-cost password hashing and verification.

pub mod errors;
pub mod hash;

pub use errors::CodecError;
pub use hash::{HashCost, check_hash, compute_hash};
