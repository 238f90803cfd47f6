//! Native (out-of-circuit) Longsight permutations.
//!
//! These mirror the gadgets in [`crate::gadgets::longsight`] operation for
//! operation and are what witness generation and the tests compare against.

use ark_bn254::Fr;
use ark_ff::Field;

use crate::constants::{LONGSIGHT_F12P5, LONGSIGHT_F152P5, LONGSIGHT_F322P5, LONGSIGHT_L12P5};

fn fifth_power(t: Fr) -> Fr {
    t.pow([5u64])
}

/// LongsightF Feistel permutation: `x[i+2] = x[i] + (x[i+1] + C[i])^5`.
pub fn longsight_f(constants: &[Fr], x_l: Fr, x_r: Fr) -> Fr {
    assert!(!constants.is_empty(), "empty round-constant table");
    let (mut l, mut r) = (x_l, x_r);
    for c in constants {
        let j = fifth_power(l + c);
        let next = r + j;
        r = l;
        l = next;
    }
    l
}

pub fn longsight_f12p5(x_l: Fr, x_r: Fr) -> Fr {
    longsight_f(&LONGSIGHT_F12P5, x_l, x_r)
}

pub fn longsight_f152p5(x_l: Fr, x_r: Fr) -> Fr {
    longsight_f(&LONGSIGHT_F152P5, x_l, x_r)
}

pub fn longsight_f322p5(x_l: Fr, x_r: Fr) -> Fr {
    longsight_f(&LONGSIGHT_F322P5, x_l, x_r)
}

/// LongsightL keyed permutation: `x[i+1] = x[i] + (x[i] + k + C[i])^5`.
///
/// The key `k` enters every round; the input feeds forward additively into
/// every round output.
pub fn longsight_l(constants: &[Fr], x: Fr, k: Fr) -> Fr {
    assert!(!constants.is_empty(), "empty round-constant table");
    let mut state = x;
    for c in constants {
        state += fifth_power(state + k + c);
    }
    state
}

pub fn longsight_l12p5(x: Fr, k: Fr) -> Fr {
    longsight_l(&LONGSIGHT_L12P5, x, k)
}

/// Miyaguchi–Preneel compression over the LongsightL keyed permutation.
///
/// `H_0 = E_IV(m_0) + m_0`, then `H_i = H_{i-1} + E_{H_{i-1}}(m_i) + m_i`.
/// The IV keys the first round but is not folded into the first output sum.
pub fn miyaguchi_preneel(constants: &[Fr], iv: Fr, messages: &[Fr]) -> Fr {
    assert!(!messages.is_empty(), "empty message block sequence");
    let mut state = iv;
    for (i, m) in messages.iter().enumerate() {
        let cipher = longsight_l(constants, *m, state);
        state = if i == 0 { cipher + m } else { state + cipher + m };
    }
    state
}

/// The Merkle pair hash: MP over LongsightL12p5, keyed by the level IV.
pub fn longsight_l12p5_mp(iv: Fr, messages: &[Fr]) -> Fr {
    miyaguchi_preneel(&LONGSIGHT_L12P5, iv, messages)
}
