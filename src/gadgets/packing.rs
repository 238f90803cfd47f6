//! Bit/field packing adapters.
//!
//! The round-function hashes work on field elements while digests, Merkle
//! addresses and EdDSA scalars are bit strings; these adapters convert
//! between the two. Packing is a pure linear combination and costs no
//! constraint rows; bitness is carried by the `Boolean`/`UInt8` types
//! themselves.
//!
//! Conventions (fixed wire format): bit arrays are little-endian (bit 0 is
//! the 2^0 coefficient); a digest's bit array is its bytes in order, each
//! byte contributing its bits little-endian; scalar bit arrays handed to
//! point multiplication are most-significant-bit first.

use ark_bn254::Fr;
use ark_ff::{Field, One, PrimeField, Zero};
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::SynthesisError;

/// Usable bits of a field element: one less than the modulus bit length.
pub const FIELD_CAPACITY: usize = (Fr::MODULUS_BIT_SIZE - 1) as usize;

/// Width of a hash digest in bits.
pub const DIGEST_BITS: usize = 256;

fn lc_pack(bits: &[Boolean<Fr>]) -> FpVar<Fr> {
    let mut acc = FpVar::<Fr>::zero();
    let mut coeff = Fr::one();
    for bit in bits {
        acc += FpVar::from(bit.clone()) * coeff;
        coeff.double_in_place();
    }
    acc
}

/// Pack at most a capacity's worth of little-endian bits into one element.
pub fn pack_bits_le(bits: &[Boolean<Fr>]) -> Result<FpVar<Fr>, SynthesisError> {
    assert!(
        bits.len() <= FIELD_CAPACITY,
        "bit array exceeds the field capacity"
    );
    Ok(lc_pack(bits))
}

/// Pack an arbitrary-length bit array, wrapping modulo the field order.
///
/// Used by the Longsight bits adapter, which folds a whole 256-bit digest
/// into a single hash input and accepts the reduction.
pub fn pack_bits_le_wrapping(bits: &[Boolean<Fr>]) -> FpVar<Fr> {
    lc_pack(bits)
}

/// Split a bit array into capacity-sized chunks and pack each.
pub fn multipack(bits: &[Boolean<Fr>]) -> Result<Vec<FpVar<Fr>>, SynthesisError> {
    bits.chunks(FIELD_CAPACITY).map(pack_bits_le).collect()
}

/// Constrain already-allocated packed elements to equal the packing of
/// `bits`. This is how bit-level witnesses are bound to the packed primary
/// inputs of a circuit.
pub fn enforce_multipacking(
    bits: &[Boolean<Fr>],
    packed: &[FpVar<Fr>],
) -> Result<(), SynthesisError> {
    let chunks = multipack(bits)?;
    assert_eq!(
        chunks.len(),
        packed.len(),
        "packed element count does not match the bit array"
    );
    for (chunk, var) in chunks.iter().zip(packed) {
        chunk.enforce_equal(var)?;
    }
    Ok(())
}

/// Native mirror of [`pack_bits_le_wrapping`].
pub fn pack_bits_le_wrapping_native(bits: &[bool]) -> Fr {
    let mut acc = Fr::zero();
    let mut coeff = Fr::one();
    for bit in bits {
        if *bit {
            acc += coeff;
        }
        coeff.double_in_place();
    }
    acc
}

/// Native mirror of [`multipack`], for computing public-input vectors.
pub fn multipack_native(bits: &[bool]) -> Vec<Fr> {
    bits.chunks(FIELD_CAPACITY)
        .map(pack_bits_le_wrapping_native)
        .collect()
}

/// Digest bytes to their little-endian bit array.
pub fn bytes_to_bits_le(bytes: &[UInt8<Fr>]) -> Result<Vec<Boolean<Fr>>, SynthesisError> {
    let mut out = Vec::with_capacity(bytes.len() * 8);
    for byte in bytes {
        out.extend(byte.to_bits_le()?);
    }
    Ok(out)
}

/// Native mirror of [`bytes_to_bits_le`].
pub fn bytes_to_bits_le_native(bytes: &[u8]) -> Vec<bool> {
    let mut out = Vec::with_capacity(bytes.len() * 8);
    for byte in bytes {
        for j in 0..8 {
            out.push((byte >> j) & 1 == 1);
        }
    }
    out
}

/// Digest bytes to a most-significant-bit-first bit array, suitable as a
/// scalar for point multiplication.
pub fn digest_bits_msb(bytes: &[UInt8<Fr>]) -> Result<Vec<Boolean<Fr>>, SynthesisError> {
    let mut out = Vec::with_capacity(bytes.len() * 8);
    for byte in bytes {
        let mut bits = byte.to_bits_le()?;
        bits.reverse();
        out.extend(bits);
    }
    Ok(out)
}

/// Native mirror of [`digest_bits_msb`].
pub fn digest_bits_msb_native(bytes: &[u8]) -> Vec<bool> {
    let mut out = Vec::with_capacity(bytes.len() * 8);
    for byte in bytes {
        for j in (0..8).rev() {
            out.push((byte >> j) & 1 == 1);
        }
    }
    out
}

/// Canonical 256-bit big-endian byte encoding of a field element.
///
/// The element's 254-bit little-endian decomposition is zero-padded to 256
/// bits and re-grouped into big-endian byte order; this is the coordinate
/// encoding hashed by the EdDSA challenge chain.
pub fn fp_to_bytes_be(x: &FpVar<Fr>) -> Result<Vec<UInt8<Fr>>, SynthesisError> {
    let mut bits = x.to_bits_le()?;
    bits.resize(256, Boolean::constant(false));
    let mut bytes: Vec<UInt8<Fr>> = bits.chunks(8).map(UInt8::from_bits_le).collect();
    bytes.reverse();
    Ok(bytes)
}

/// Native mirror of [`fp_to_bytes_be`].
pub fn fp_to_bytes_be_native(x: &Fr) -> [u8; 32] {
    use ark_ff::BigInteger;
    let bytes = x.into_bigint().to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}
