//! Merkle path authentication over field-element digests.
//!
//! An arithmetic circuit has no branching, so choosing which side of a hash
//! the running value lands on is done by blending with the address bit:
//!
//! ```text
//! left  = is_right ? sibling : input
//! right = is_right ? input   : sibling
//! ```
//!
//! The authenticator chains one selector + one pair hash per level, keyed by
//! that level's IV, and *constrains* the final value to equal the expected
//! root. Without that last row a prover could present a correct-looking
//! leaf/path pair disconnected from the root.

use ark_bn254::Fr;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::SynthesisError;

use crate::gadgets::longsight::longsight_l12p5_mp_gadget;

/// The pair-hash capability the authenticator is generic over.
pub trait MerkleHashGadget {
    fn hash_pair(
        iv: &FpVar<Fr>,
        left: &FpVar<Fr>,
        right: &FpVar<Fr>,
    ) -> Result<FpVar<Fr>, SynthesisError>;
}

/// Miyaguchi–Preneel over LongsightL12p5, the tree hash used throughout.
pub struct LongsightL12Mp;

impl MerkleHashGadget for LongsightL12Mp {
    fn hash_pair(
        iv: &FpVar<Fr>,
        left: &FpVar<Fr>,
        right: &FpVar<Fr>,
    ) -> Result<FpVar<Fr>, SynthesisError> {
        longsight_l12p5_mp_gadget(iv, &[left.clone(), right.clone()])
    }
}

/// Order the (input, sibling) pair by the address bit.
pub fn merkle_path_selector(
    input: &FpVar<Fr>,
    sibling: &FpVar<Fr>,
    is_right: &Boolean<Fr>,
) -> Result<(FpVar<Fr>, FpVar<Fr>), SynthesisError> {
    let left = is_right.select(sibling, input)?;
    let right = is_right.select(input, sibling)?;
    Ok((left, right))
}

/// Recompute the root from `leaf` along `path` and constrain it to equal
/// `expected_root`. Returns the computed root variable.
///
/// `address_bits[i]` states whether the level-`i` running value is the right
/// child. Depth must be positive and the address, path and IV arrays must
/// all cover it; a mismatch is a construction bug, not a witness problem.
pub fn merkle_path_authenticator<H: MerkleHashGadget>(
    address_bits: &[Boolean<Fr>],
    leaf: &FpVar<Fr>,
    expected_root: &FpVar<Fr>,
    path: &[FpVar<Fr>],
    ivs: &[Fr],
) -> Result<FpVar<Fr>, SynthesisError> {
    let depth = address_bits.len();
    assert!(depth > 0, "tree depth must be positive");
    assert_eq!(path.len(), depth, "sibling path length must equal depth");
    assert!(ivs.len() >= depth, "need one IV per tree level");

    let mut current = leaf.clone();
    for ((bit, sibling), iv) in address_bits.iter().zip(path).zip(ivs) {
        let (left, right) = merkle_path_selector(&current, sibling, bit)?;
        current = H::hash_pair(&FpVar::constant(*iv), &left, &right)?;
    }
    current.enforce_equal(expected_root)?;
    Ok(current)
}
