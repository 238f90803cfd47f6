//! R1CS gadgets for the Miximus mixer
//!
//! This crate builds zero-knowledge proof circuits over the BN254 scalar
//! field: SNARK-efficient Longsight round-function hashes, full-round
//! SHA-256, Baby JubJub twisted Edwards arithmetic (membership, addition,
//! constant-shape scalar multiplication), EdDSA signature verification,
//! Pedersen commitments and Merkle path authentication — composed into the
//! Miximus circuit: "I know a secret committed in a public Merkle set, and I
//! reveal its one-time nullifier without revealing which set member it is."
//!
//! Gadgets are functions over `ark-r1cs-std` variables sharing one
//! `ConstraintSystemRef` per proof; every gadget has a native counterpart
//! used for witness preparation and differential testing. Proving and
//! verification go through `ark-groth16`.

pub mod constants;
pub mod error;
pub mod gadgets;
pub mod jubjub;
pub mod longsight;
pub mod merkle_tree;
pub mod mixer;

// Re-exports - public API
pub use error::{Error, Result};
pub use longsight::{
    longsight_f12p5, longsight_f152p5, longsight_f322p5, longsight_l12p5, longsight_l12p5_mp,
};
pub use merkle_tree::{LongsightMerkleHasher, MerkleProof, MerkleTree};
pub use mixer::{
    generate_keys, mixer_leaf, mixer_nullifier, mixer_public_inputs, prove, verify, MixerCircuit,
    PACKED_PUBLIC_INPUTS,
};
