//! Deterministic derivation of the Longsight round-constant tables and the
//! per-level Merkle tree IVs.
//!
//! Constant `i` of table `<prefix><rounds>p<exponent>` is the SHA-256 digest
//! of the table name followed by the 32-bit little-endian counter, reduced
//! little-endian into the field. The Merkle IVs come from a single running
//! SHA-256 stream instead: level `i`'s IV is the stream digest after
//! absorbing `"MerkleTree-" || LE16(i)`, reduced big-endian.

use ark_bn254::Fr;
use ark_ff::PrimeField;
use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};

/// Derive a Longsight round-constant table.
///
/// The table length fixes the circuit depth of every gadget built on it.
pub fn longsight_constants(prefix: &str, rounds: usize, exponent: u32) -> Vec<Fr> {
    assert!(rounds > 0, "empty round-constant table");
    let name = format!("{prefix}{rounds}p{exponent}");
    (0..rounds as u32)
        .map(|i| {
            let mut h = Sha256::new();
            h.update(name.as_bytes());
            h.update(i.to_le_bytes());
            Fr::from_le_bytes_mod_order(&h.finalize())
        })
        .collect()
}

/// 12-round LongsightF table.
pub static LONGSIGHT_F12P5: Lazy<Vec<Fr>> =
    Lazy::new(|| longsight_constants("LongsightF", 12, 5));

/// 152-round LongsightF table (2·⌈log₅ p⌉ rounds).
pub static LONGSIGHT_F152P5: Lazy<Vec<Fr>> =
    Lazy::new(|| longsight_constants("LongsightF", 152, 5));

/// 322-round LongsightF table.
pub static LONGSIGHT_F322P5: Lazy<Vec<Fr>> =
    Lazy::new(|| longsight_constants("LongsightF", 322, 5));

/// 12-round LongsightL table.
pub static LONGSIGHT_L12P5: Lazy<Vec<Fr>> =
    Lazy::new(|| longsight_constants("LongsightL", 12, 5));

/// Per-level IVs for the Longsight Merkle tree, one per tree level.
pub fn merkle_tree_ivs(depth: usize) -> Vec<Fr> {
    let mut stream = Sha256::new();
    (0..depth)
        .map(|i| {
            stream.update(b"MerkleTree-");
            stream.update((i as u16).to_le_bytes());
            Fr::from_be_bytes_mod_order(&stream.clone().finalize())
        })
        .collect()
}
