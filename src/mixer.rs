//! The Miximus mixer circuit.
//!
//! Statement: "I know a 32-byte pair (seed, secret) such that
//! `SHA256(seed ‖ secret)` is a leaf of the Merkle tree with the declared
//! root, and the declared nullifier equals
//! `SHA256(seed ‖ external_nullifier)`."
//!
//! Revealing the nullifier gives each seed exactly one canonical public tag,
//! so a seed cannot be spent twice, while the Merkle witness never reveals
//! which leaf was spent. The signal and signal-variables digests carry no
//! constraints of their own; binding them into the packed public inputs
//! commits the proof to them (a proof made for one signal cannot be replayed
//! for another).
//!
//! Public inputs are exactly the five digests root, signal,
//! signal_variables, external_nullifier, nullifier — 1280 bits multipacked
//! into six field elements. Everything else (seed, secret, address bits,
//! sibling path) is auxiliary witness. The packing layout is baked into the
//! verification key; [`mixer_public_inputs`] computes the verifier's side of
//! it.

use ark_bn254::{Bn254, Fr};
use ark_groth16::{Groth16, Proof, ProvingKey, VerifyingKey};
use ark_r1cs_std::prelude::*;
use ark_r1cs_std::fields::fp::FpVar;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};
use ark_snark::SNARK;
use ark_std::rand::{CryptoRng, RngCore};

use crate::error::{Error, Result};
use crate::gadgets::packing::{
    bytes_to_bits_le, bytes_to_bits_le_native, enforce_multipacking, multipack_native,
    DIGEST_BITS, FIELD_CAPACITY,
};
use crate::gadgets::sha256::{
    digest_witness, sha256_pair_gadget, sha256_pair_native, DIGEST_BYTES,
};

/// The five public digests: root, signal, signal_variables,
/// external_nullifier, nullifier.
pub const PUBLIC_DIGESTS: usize = 5;

/// Packed public-input count: ⌈5·256 / 253⌉.
pub const PACKED_PUBLIC_INPUTS: usize =
    (PUBLIC_DIGESTS * DIGEST_BITS + FIELD_CAPACITY - 1) / FIELD_CAPACITY;

/// The mixer circuit. `None` witnesses synthesize the bare shape for key
/// generation; proving requires every field.
#[derive(Clone)]
pub struct MixerCircuit {
    tree_depth: usize,
    pub root: Option<[u8; DIGEST_BYTES]>,
    pub signal: Option<[u8; DIGEST_BYTES]>,
    pub signal_variables: Option<[u8; DIGEST_BYTES]>,
    pub external_nullifier: Option<[u8; DIGEST_BYTES]>,
    pub nullifier: Option<[u8; DIGEST_BYTES]>,
    pub nullifier_seed: Option<[u8; DIGEST_BYTES]>,
    pub secret: Option<[u8; DIGEST_BYTES]>,
    pub address_bits: Option<Vec<bool>>,
    pub path: Option<Vec<[u8; DIGEST_BYTES]>>,
}

impl MixerCircuit {
    /// Shape-only circuit for key generation.
    pub fn blank(tree_depth: usize) -> Self {
        assert!(tree_depth > 0, "tree depth must be positive");
        Self {
            tree_depth,
            root: None,
            signal: None,
            signal_variables: None,
            external_nullifier: None,
            nullifier: None,
            nullifier_seed: None,
            secret: None,
            address_bits: None,
            path: None,
        }
    }

    pub fn tree_depth(&self) -> usize {
        self.tree_depth
    }

    fn validate(&self) -> Result<()> {
        let address = self
            .address_bits
            .as_ref()
            .ok_or(Error::WitnessLengthMismatch)?;
        let path = self.path.as_ref().ok_or(Error::WitnessLengthMismatch)?;
        if address.len() != self.tree_depth || path.len() != self.tree_depth {
            return Err(Error::WitnessLengthMismatch);
        }
        Ok(())
    }
}

impl ConstraintSynthesizer<Fr> for MixerCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> core::result::Result<(), SynthesisError> {
        assert!(self.tree_depth > 0, "tree depth must be positive");

        // Packed public inputs come first so they occupy the leading
        // instance slots the verification key expects.
        let packed_values = match (
            &self.root,
            &self.signal,
            &self.signal_variables,
            &self.external_nullifier,
            &self.nullifier,
        ) {
            (Some(r), Some(s), Some(v), Some(e), Some(n)) => {
                Some(mixer_public_inputs(r, s, v, e, n))
            }
            _ => None,
        };
        let mut packed = Vec::with_capacity(PACKED_PUBLIC_INPUTS);
        for i in 0..PACKED_PUBLIC_INPUTS {
            packed.push(FpVar::new_input(cs.clone(), || {
                packed_values
                    .as_ref()
                    .map(|v| v[i])
                    .ok_or(SynthesisError::AssignmentMissing)
            })?);
        }

        let root = digest_witness(cs.clone(), &self.root)?;
        let signal = digest_witness(cs.clone(), &self.signal)?;
        let signal_variables = digest_witness(cs.clone(), &self.signal_variables)?;
        let external_nullifier = digest_witness(cs.clone(), &self.external_nullifier)?;
        let nullifier = digest_witness(cs.clone(), &self.nullifier)?;
        let seed = digest_witness(cs.clone(), &self.nullifier_seed)?;
        let secret = digest_witness(cs.clone(), &self.secret)?;

        let mut public_bits = Vec::with_capacity(PUBLIC_DIGESTS * DIGEST_BITS);
        for digest in [
            &root,
            &signal,
            &signal_variables,
            &external_nullifier,
            &nullifier,
        ] {
            public_bits.extend(bytes_to_bits_le(digest)?);
        }
        enforce_multipacking(&public_bits, &packed)?;

        // The leaf commits to the secret; the nullifier is the seed's
        // canonical tag under this external nullifier.
        let leaf = sha256_pair_gadget(&seed, &secret)?;
        let nullifier_check = sha256_pair_gadget(&seed, &external_nullifier)?;
        nullifier_check
            .as_slice()
            .enforce_equal(nullifier.as_slice())?;

        // Merkle authentication over digest nodes.
        let mut address = Vec::with_capacity(self.tree_depth);
        for i in 0..self.tree_depth {
            address.push(Boolean::new_witness(cs.clone(), || {
                self.address_bits
                    .as_ref()
                    .and_then(|v| v.get(i))
                    .copied()
                    .ok_or(SynthesisError::AssignmentMissing)
            })?);
        }
        let mut path = Vec::with_capacity(self.tree_depth);
        for i in 0..self.tree_depth {
            let sibling = self.path.as_ref().and_then(|p| p.get(i)).copied();
            path.push(digest_witness(cs.clone(), &sibling)?);
        }

        let mut current = leaf;
        for (bit, sibling) in address.iter().zip(&path) {
            let mut left = Vec::with_capacity(DIGEST_BYTES);
            let mut right = Vec::with_capacity(DIGEST_BYTES);
            for (cur_byte, sib_byte) in current.iter().zip(sibling) {
                left.push(bit.select(sib_byte, cur_byte)?);
                right.push(bit.select(cur_byte, sib_byte)?);
            }
            current = sha256_pair_gadget(&left, &right)?;
        }
        current.as_slice().enforce_equal(root.as_slice())
    }
}

/// The verifier's public-input vector: the five digests' bits multipacked
/// into six field elements, in circuit order.
pub fn mixer_public_inputs(
    root: &[u8; DIGEST_BYTES],
    signal: &[u8; DIGEST_BYTES],
    signal_variables: &[u8; DIGEST_BYTES],
    external_nullifier: &[u8; DIGEST_BYTES],
    nullifier: &[u8; DIGEST_BYTES],
) -> Vec<Fr> {
    let mut bits = Vec::with_capacity(PUBLIC_DIGESTS * DIGEST_BITS);
    for digest in [root, signal, signal_variables, external_nullifier, nullifier] {
        bits.extend(bytes_to_bits_le_native(digest));
    }
    multipack_native(&bits)
}

/// Native leaf derivation.
pub fn mixer_leaf(
    seed: &[u8; DIGEST_BYTES],
    secret: &[u8; DIGEST_BYTES],
) -> [u8; DIGEST_BYTES] {
    sha256_pair_native(seed, secret)
}

/// Native nullifier derivation.
pub fn mixer_nullifier(
    seed: &[u8; DIGEST_BYTES],
    external_nullifier: &[u8; DIGEST_BYTES],
) -> [u8; DIGEST_BYTES] {
    sha256_pair_native(seed, external_nullifier)
}

/// Build all levels of a zero-padded SHA-256 digest tree of fixed depth.
///
/// Level 0 holds the leaves padded to 2^depth with zero digests; level
/// `depth` holds the root alone.
pub fn sha256_merkle_levels(
    leaves: &[[u8; DIGEST_BYTES]],
    depth: usize,
) -> Vec<Vec<[u8; DIGEST_BYTES]>> {
    assert!(depth > 0, "tree depth must be positive");
    assert!(leaves.len() <= 1 << depth, "too many leaves for this depth");
    let mut level: Vec<[u8; DIGEST_BYTES]> = leaves.to_vec();
    level.resize(1 << depth, [0u8; DIGEST_BYTES]);
    let mut levels = vec![level];
    for _ in 0..depth {
        let prev = levels.last().expect("levels never empty");
        let next: Vec<[u8; DIGEST_BYTES]> = prev
            .chunks(2)
            .map(|pair| sha256_pair_native(&pair[0], &pair[1]))
            .collect();
        levels.push(next);
    }
    levels
}

/// Authentication path and address bits for leaf `index`.
pub fn sha256_merkle_path(
    levels: &[Vec<[u8; DIGEST_BYTES]>],
    index: usize,
) -> (Vec<[u8; DIGEST_BYTES]>, Vec<bool>) {
    let depth = levels.len() - 1;
    let mut path = Vec::with_capacity(depth);
    let mut address = Vec::with_capacity(depth);
    let mut idx = index;
    for level in levels.iter().take(depth) {
        let sibling = if idx % 2 == 0 { idx + 1 } else { idx - 1 };
        path.push(level[sibling]);
        address.push(idx % 2 == 1);
        idx /= 2;
    }
    (path, address)
}

/// The root of a digest tree built by [`sha256_merkle_levels`].
pub fn sha256_merkle_root(levels: &[Vec<[u8; DIGEST_BYTES]>]) -> [u8; DIGEST_BYTES] {
    levels.last().expect("levels never empty")[0]
}

/// Generate a Groth16 keypair for a mixer of the given tree depth.
///
/// The packed-input layout is baked into the verification key; proofs from
/// a circuit of any other depth or layout will not verify.
pub fn generate_keys<R: RngCore + CryptoRng>(
    tree_depth: usize,
    rng: &mut R,
) -> Result<(ProvingKey<Bn254>, VerifyingKey<Bn254>)> {
    tracing::info!(tree_depth, "generating mixer keypair");
    let circuit = MixerCircuit::blank(tree_depth);
    let keys = Groth16::<Bn254>::circuit_specific_setup(circuit, rng)?;
    Ok(keys)
}

/// Prove a fully assigned mixer circuit.
pub fn prove<R: RngCore + CryptoRng>(
    pk: &ProvingKey<Bn254>,
    circuit: MixerCircuit,
    rng: &mut R,
) -> Result<Proof<Bn254>> {
    circuit.validate()?;
    tracing::debug!(tree_depth = circuit.tree_depth, "proving mixer spend");
    let proof = Groth16::<Bn254>::prove(pk, circuit, rng)?;
    Ok(proof)
}

/// Verify a proof against packed public inputs.
///
/// A `false` return is the ordinary outcome for a forged or stale proof,
/// not an error.
pub fn verify(
    vk: &VerifyingKey<Bn254>,
    public_inputs: &[Fr],
    proof: &Proof<Bn254>,
) -> Result<bool> {
    let pvk = Groth16::<Bn254>::process_vk(vk)?;
    let ok = Groth16::<Bn254>::verify_with_processed_vk(&pvk, public_inputs, proof)?;
    Ok(ok)
}
