//! EdDSA over Baby JubJub: native signer and in-circuit verifier.
//!
//! The challenge derivation is a fixed wire format shared bit-for-bit by
//! both sides. With `‖` as byte concatenation and coordinates encoded as
//! 256-bit big-endian strings:
//!
//! ```text
//! e_R = SHA256(R.x ‖ R.y)
//! e_A = SHA256(A.x ‖ A.y)
//! h   = SHA256(SHA256(e_R ‖ e_A) ‖ m)
//! ```
//!
//! A signature (R, s) over a 32-byte message m verifies iff
//! `B·s = R + A·h`, where the in-circuit right-hand multiplication consumes
//! all 256 digest bits of `h` MSB-first. Both A and R are in the prime
//! subgroup (the signer produces them from B), so reducing h mod the
//! subgroup order on the native side yields the same point.

use ark_bn254::Fr;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ed_on_bn254::EdwardsAffine;
use ark_ff::{BigInteger, PrimeField};
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::SynthesisError;
use sha2::{Digest, Sha256};

use super::curve::{enforce_on_curve, point_add, point_mul, PointVar};
use super::{SubgroupScalar, GENERATOR};
use crate::gadgets::packing::{digest_bits_msb, digest_bits_msb_native, fp_to_bytes_be};
use crate::gadgets::sha256::{sha256_full_gadget, sha256_pair_gadget, DIGEST_BYTES};

/// Width of the response-scalar bit array (field capacity).
pub const EDDSA_S_BITS: usize = 253;

#[derive(Clone, Debug)]
pub struct Signature {
    pub r: EdwardsAffine,
    pub s: SubgroupScalar,
}

fn coordinate_bytes(v: &Fr) -> [u8; 32] {
    let bytes = v.into_bigint().to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}

fn point_bytes(p: &EdwardsAffine) -> [u8; 64] {
    let mut out = [0u8; 64];
    out[..32].copy_from_slice(&coordinate_bytes(&p.x));
    out[32..].copy_from_slice(&coordinate_bytes(&p.y));
    out
}

/// The shared challenge digest `h`.
pub fn eddsa_challenge(r: &EdwardsAffine, a: &EdwardsAffine, msg: &[u8; 32]) -> [u8; 32] {
    let e_r = Sha256::digest(point_bytes(r));
    let e_a = Sha256::digest(point_bytes(a));
    let mut h = Sha256::new();
    h.update(e_r);
    h.update(e_a);
    let e_points = h.finalize();
    let mut h = Sha256::new();
    h.update(e_points);
    h.update(msg);
    h.finalize().into()
}

pub fn eddsa_public_key(secret: &SubgroupScalar) -> EdwardsAffine {
    (GENERATOR.into_group() * *secret).into_affine()
}

/// Deterministic-nonce signature over a 32-byte message.
pub fn eddsa_sign(secret: &SubgroupScalar, msg: &[u8; 32]) -> Signature {
    let a = eddsa_public_key(secret);
    let mut h = Sha256::new();
    h.update(b"Miximus.EdDSA.nonce");
    h.update(secret.into_bigint().to_bytes_be());
    h.update(msg);
    let nonce = SubgroupScalar::from_be_bytes_mod_order(&h.finalize());
    let r = (GENERATOR.into_group() * nonce).into_affine();
    let t = SubgroupScalar::from_be_bytes_mod_order(&eddsa_challenge(&r, &a, msg));
    Signature {
        r,
        s: nonce + *secret * t,
    }
}

/// Native verification; mirrors the gadget's equation.
pub fn eddsa_verify(pk: &EdwardsAffine, sig: &Signature, msg: &[u8; 32]) -> bool {
    let t = SubgroupScalar::from_be_bytes_mod_order(&eddsa_challenge(&sig.r, pk, msg));
    let lhs = GENERATOR.into_group() * sig.s;
    let rhs = sig.r.into_group() + pk.into_group() * t;
    lhs.into_affine() == rhs.into_affine()
}

/// The response scalar as the 253-bit MSB-first array the gadget consumes.
pub fn response_bits(s: &SubgroupScalar) -> Vec<bool> {
    let bytes = s.into_bigint().to_bytes_be();
    let mut padded = [0u8; 32];
    padded[32 - bytes.len()..].copy_from_slice(&bytes);
    digest_bits_msb_native(&padded)[256 - EDDSA_S_BITS..].to_vec()
}

fn point_bytes_var(p: &PointVar) -> Result<Vec<UInt8<Fr>>, SynthesisError> {
    let mut out = fp_to_bytes_be(&p.x)?;
    out.extend(fp_to_bytes_be(&p.y)?);
    Ok(out)
}

/// Constrain `(r, s_bits)` to be a valid signature by `pk` on `msg`.
pub fn eddsa_verify_gadget(
    base: &PointVar,
    pk: &PointVar,
    r: &PointVar,
    s_bits: &[Boolean<Fr>],
    msg: &[UInt8<Fr>],
) -> Result<(), SynthesisError> {
    assert_eq!(s_bits.len(), EDDSA_S_BITS, "response scalar must be 253 bits");
    assert_eq!(msg.len(), DIGEST_BYTES, "message must be a 32-byte digest");

    enforce_on_curve(pk)?;
    enforce_on_curve(r)?;

    let e_r = sha256_full_gadget(&point_bytes_var(r)?)?;
    let e_a = sha256_full_gadget(&point_bytes_var(pk)?)?;
    let e_points = sha256_pair_gadget(&e_r, &e_a)?;
    let mut tail = Vec::with_capacity(2 * DIGEST_BYTES);
    tail.extend_from_slice(&e_points);
    tail.extend_from_slice(msg);
    let h = sha256_full_gadget(&tail)?;
    let h_bits = digest_bits_msb(&h)?;

    let lhs = point_mul(base, s_bits)?;
    let rhs_mul = point_mul(pk, &h_bits)?;
    let rhs = point_add(r, &rhs_mul[h_bits.len() - 1])?;

    lhs[EDDSA_S_BITS - 1].enforce_equal(&rhs)
}
