//! Pedersen commitment: `commitment = m·Base + r·H`.
//!
//! `Base` and `H` must be independent points (H not a known multiple of
//! Base) for the commitment to be unconditionally hiding; derive them with
//! [`crate::jubjub::point_from_hash`] under distinct tags. Both scalars are
//! exactly 253 bits, the field capacity — this is a security bound, not a
//! tunable.

use ark_bn254::Fr;
use ark_ed_on_bn254::EdwardsAffine;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::SynthesisError;

use super::curve::{enforce_on_curve, point_add, point_mul, PointVar};
use super::{point_add_native, point_mul_bits_native};

/// Scalar width for both the value and the blinding factor.
pub const PEDERSEN_SCALAR_BITS: usize = 253;

/// Native commitment; bits are MSB-first.
pub fn pedersen_commit(
    base: &EdwardsAffine,
    h: &EdwardsAffine,
    m_bits: &[bool],
    r_bits: &[bool],
) -> EdwardsAffine {
    assert_eq!(m_bits.len(), PEDERSEN_SCALAR_BITS, "value must be 253 bits");
    assert_eq!(
        r_bits.len(),
        PEDERSEN_SCALAR_BITS,
        "blinding factor must be 253 bits"
    );
    point_add_native(
        &point_mul_bits_native(h, r_bits),
        &point_mul_bits_native(base, m_bits),
    )
}

/// Constrain `commitment = m·base + r·h`.
///
/// Both bases are additionally constrained to lie on the curve. That is
/// redundant for fixed public constants but costs little and removes a
/// whole class of misuse when callers wire in variable bases.
pub fn pedersen_commitment_gadget(
    base: &PointVar,
    h: &PointVar,
    m_bits: &[Boolean<Fr>],
    r_bits: &[Boolean<Fr>],
    commitment: &PointVar,
) -> Result<(), SynthesisError> {
    assert_eq!(m_bits.len(), PEDERSEN_SCALAR_BITS, "value must be 253 bits");
    assert_eq!(
        r_bits.len(),
        PEDERSEN_SCALAR_BITS,
        "blinding factor must be 253 bits"
    );

    enforce_on_curve(base)?;
    enforce_on_curve(h)?;

    let lhs = point_mul(base, m_bits)?;
    let rhs = point_mul(h, r_bits)?;
    let result = point_add(
        &rhs[PEDERSEN_SCALAR_BITS - 1],
        &lhs[PEDERSEN_SCALAR_BITS - 1],
    )?;
    result.enforce_equal(commitment)
}
