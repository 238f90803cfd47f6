//! Baby JubJub: the twisted Edwards curve `a·x² + y² = 1 + d·x²·y²` over the
//! BN254 scalar field, with `a = 168700`, `d = 168696`.
//!
//! This module holds the curve parameters and the native (witness-side)
//! point arithmetic; the in-circuit counterparts live in [`curve`],
//! [`eddsa`] and [`pedersen`].

pub mod curve;
pub mod eddsa;
pub mod pedersen;

use ark_bn254::Fr;
use ark_ec::{AffineRepr, CurveGroup, Group};
use ark_ed_on_bn254::{EdwardsAffine, EdwardsProjective};
use ark_ff::{Field, One, PrimeField, Zero};
use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};
use std::str::FromStr;

/// Prime-order subgroup scalar field (order `JUBJUB_L`).
pub type SubgroupScalar = ark_ed_on_bn254::Fr;

/// Twisted Edwards coefficient `a`.
pub fn coeff_a() -> Fr {
    Fr::from(168700u64)
}

/// Twisted Edwards coefficient `d`.
pub fn coeff_d() -> Fr {
    Fr::from(168696u64)
}

/// The conventional generator of the prime-order subgroup.
pub static GENERATOR: Lazy<EdwardsAffine> = Lazy::new(|| {
    EdwardsAffine::new_unchecked(
        Fr::from_str(
            "17777552123799933955779906779655732241715742912184938656739573121738514868268",
        )
        .expect("generator x"),
        Fr::from_str(
            "2626589144620713026669568689430873010625803728049924121243784502389097019475",
        )
        .expect("generator y"),
    )
});

/// Affine curve-membership check against the (a, d) parameters.
pub fn is_on_curve(x: Fr, y: Fr) -> bool {
    let xx = x.square();
    let yy = y.square();
    coeff_a() * xx + yy == Fr::one() + coeff_d() * xx * yy
}

pub fn point_add_native(p: &EdwardsAffine, q: &EdwardsAffine) -> EdwardsAffine {
    (p.into_group() + q.into_group()).into_affine()
}

pub fn point_double_native(p: &EdwardsAffine) -> EdwardsAffine {
    point_add_native(p, p)
}

/// Double-and-add over an explicit MSB-first bit array.
///
/// Mirrors the in-circuit ladder: same bit order, same identity seed.
pub fn point_mul_bits_native(base: &EdwardsAffine, bits: &[bool]) -> EdwardsAffine {
    let mut acc = EdwardsProjective::zero();
    for bit in bits {
        acc.double_in_place();
        if *bit {
            acc += base.into_group();
        }
    }
    acc.into_affine()
}

/// Map arbitrary bytes to a point in the prime-order subgroup.
///
/// Try-and-increment on the y coordinate, then cofactor clearing. Used to
/// derive Pedersen bases that are not known multiples of each other.
pub fn point_from_hash(data: &[u8]) -> EdwardsAffine {
    let mut ctr: u32 = 0;
    loop {
        let mut h = Sha256::new();
        h.update(data);
        h.update(ctr.to_be_bytes());
        let y = Fr::from_be_bytes_mod_order(&h.finalize());
        if let Some(p) = point_from_y(y) {
            let p = p.mul_by_cofactor();
            if !p.is_zero() {
                return p;
            }
        }
        ctr += 1;
    }
}

/// Solve `x² = (1 − y²) / (a − d·y²)` for a given y, if a root exists.
fn point_from_y(y: Fr) -> Option<EdwardsAffine> {
    let yy = y.square();
    let denom = coeff_a() - coeff_d() * yy;
    let xx = (Fr::one() - yy) * denom.inverse()?;
    let x = xx.sqrt()?;
    Some(EdwardsAffine::new_unchecked(x, y))
}
