//! Longsight round-function hash gadgets.
//!
//! SNARK-efficient permutations built from one fifth-power and a couple of
//! additions per round. The F family is a two-limb Feistel network:
//!
//! ```text
//! x[i+2] = x[i] + (x[i+1] + C[i])^5
//! ```
//!
//! with the first two rounds reading the start values (L, R) in place of the
//! missing earlier rounds. The L family is a keyed permutation with a
//! per-round feed-forward:
//!
//! ```text
//! x[i+1] = x[i] + (x[i] + k + C[i])^5
//! ```
//!
//! The fifth power costs three multiplication rows (t², then t³ and t⁴ for F,
//! or t⁴ by squaring twice for L) and a fourth row for `t⁴·t`; the additive
//! feed-forward folds into that row's linear combination for free. The
//! round-constant table length fixes the circuit depth exactly.

use ark_bn254::Fr;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::SynthesisError;

use crate::constants::{LONGSIGHT_F12P5, LONGSIGHT_F152P5, LONGSIGHT_F322P5, LONGSIGHT_L12P5};
use crate::gadgets::packing::{pack_bits_le_wrapping, DIGEST_BITS};

/// LongsightF over an explicit round-constant table.
///
/// Returns the final round value; emits four rows per round.
pub fn longsight_f_gadget(
    constants: &[Fr],
    x_l: &FpVar<Fr>,
    x_r: &FpVar<Fr>,
) -> Result<FpVar<Fr>, SynthesisError> {
    assert!(!constants.is_empty(), "empty round-constant table");
    let mut l = x_l.clone();
    let mut r = x_r.clone();
    for c in constants {
        let t = &l + *c;
        let t2 = t.square()?;
        let t3 = &t2 * &t;
        let t4 = &t3 * &t;
        let t5 = &t4 * &t;
        let next = &r + &t5;
        r = l;
        l = next;
    }
    Ok(l)
}

pub fn longsight_f12p5_gadget(
    x_l: &FpVar<Fr>,
    x_r: &FpVar<Fr>,
) -> Result<FpVar<Fr>, SynthesisError> {
    longsight_f_gadget(&LONGSIGHT_F12P5, x_l, x_r)
}

pub fn longsight_f152p5_gadget(
    x_l: &FpVar<Fr>,
    x_r: &FpVar<Fr>,
) -> Result<FpVar<Fr>, SynthesisError> {
    longsight_f_gadget(&LONGSIGHT_F152P5, x_l, x_r)
}

pub fn longsight_f322p5_gadget(
    x_l: &FpVar<Fr>,
    x_r: &FpVar<Fr>,
) -> Result<FpVar<Fr>, SynthesisError> {
    longsight_f_gadget(&LONGSIGHT_F322P5, x_l, x_r)
}

/// One LongsightL round: `x + (x + k + C)^5`, three rows.
fn longsight_l_round(
    constant: Fr,
    x: &FpVar<Fr>,
    k: &FpVar<Fr>,
) -> Result<FpVar<Fr>, SynthesisError> {
    let t = x + k + constant;
    let t2 = t.square()?;
    let t4 = t2.square()?;
    let t5 = &t4 * &t;
    Ok(x + &t5)
}

/// LongsightL keyed permutation over an explicit round-constant table.
pub fn longsight_l_gadget(
    constants: &[Fr],
    x: &FpVar<Fr>,
    k: &FpVar<Fr>,
) -> Result<FpVar<Fr>, SynthesisError> {
    assert!(!constants.is_empty(), "empty round-constant table");
    let mut state = x.clone();
    for c in constants {
        state = longsight_l_round(*c, &state, k)?;
    }
    Ok(state)
}

pub fn longsight_l12p5_gadget(
    x: &FpVar<Fr>,
    k: &FpVar<Fr>,
) -> Result<FpVar<Fr>, SynthesisError> {
    longsight_l_gadget(&LONGSIGHT_L12P5, x, k)
}

/// Miyaguchi–Preneel compression over the LongsightL keyed permutation.
///
/// The running state keys each block's cipher call and feeds forward into
/// the output sum; the IV keys the first call only.
pub fn miyaguchi_preneel_gadget(
    constants: &[Fr],
    iv: &FpVar<Fr>,
    messages: &[FpVar<Fr>],
) -> Result<FpVar<Fr>, SynthesisError> {
    assert!(!messages.is_empty(), "empty message block sequence");
    let mut state = iv.clone();
    for (i, m) in messages.iter().enumerate() {
        let cipher = longsight_l_gadget(constants, m, &state)?;
        state = if i == 0 {
            &cipher + m
        } else {
            &state + &cipher + m
        };
    }
    Ok(state)
}

pub fn longsight_l12p5_mp_gadget(
    iv: &FpVar<Fr>,
    messages: &[FpVar<Fr>],
) -> Result<FpVar<Fr>, SynthesisError> {
    miyaguchi_preneel_gadget(&LONGSIGHT_L12P5, iv, messages)
}

/// LongsightF with bit-array input and output.
///
/// Both inputs are 256-bit digests, folded into single field elements with
/// wrap-around packing; the result is re-exposed as its canonical 254-bit
/// little-endian decomposition.
pub fn longsight_f_bits_gadget(
    constants: &[Fr],
    left_bits: &[Boolean<Fr>],
    right_bits: &[Boolean<Fr>],
) -> Result<Vec<Boolean<Fr>>, SynthesisError> {
    assert_eq!(left_bits.len(), DIGEST_BITS, "left digest must be 256 bits");
    assert_eq!(right_bits.len(), DIGEST_BITS, "right digest must be 256 bits");
    let left = pack_bits_le_wrapping(left_bits);
    let right = pack_bits_le_wrapping(right_bits);
    let out = longsight_f_gadget(constants, &left, &right)?;
    out.to_bits_le()
}
