//! Reusable R1CS gadgets
//!
//! Constraint-emitting building blocks shared by the curve, Merkle and mixer
//! circuits:
//! - Longsight round-function hashes (F and L families, plus the MP mode)
//! - bit/field packing adapters
//! - the full-round SHA-256 block hash
//! - Merkle path selection and authentication

pub mod longsight;
pub mod merkle;
pub mod one_of_n;
pub mod packing;
pub mod sha256;
