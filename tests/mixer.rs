use ark_bn254::Fr;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::{RngCore, SeedableRng};

use miximus::mixer::{
    sha256_merkle_levels, sha256_merkle_path, sha256_merkle_root, MixerCircuit,
};
use miximus::{
    generate_keys, mixer_leaf, mixer_nullifier, mixer_public_inputs, prove, verify, Error,
    PACKED_PUBLIC_INPUTS,
};

const DEPTH: usize = 2;

struct Spend {
    circuit: MixerCircuit,
    public_inputs: Vec<Fr>,
}

fn sample_spend(rng: &mut impl RngCore) -> Spend {
    let mut seed = [0u8; 32];
    let mut secret = [0u8; 32];
    let mut external_nullifier = [0u8; 32];
    let mut signal = [0u8; 32];
    let mut signal_variables = [0u8; 32];
    rng.fill_bytes(&mut seed);
    rng.fill_bytes(&mut secret);
    rng.fill_bytes(&mut external_nullifier);
    rng.fill_bytes(&mut signal);
    rng.fill_bytes(&mut signal_variables);

    let leaf = mixer_leaf(&seed, &secret);
    let nullifier = mixer_nullifier(&seed, &external_nullifier);

    // Three unrelated deposits around ours.
    let mut other = [0u8; 32];
    rng.fill_bytes(&mut other);
    let leaves = [other, leaf, other, other];
    let levels = sha256_merkle_levels(&leaves, DEPTH);
    let root = sha256_merkle_root(&levels);
    let (path, address_bits) = sha256_merkle_path(&levels, 1);

    let mut circuit = MixerCircuit::blank(DEPTH);
    circuit.root = Some(root);
    circuit.signal = Some(signal);
    circuit.signal_variables = Some(signal_variables);
    circuit.external_nullifier = Some(external_nullifier);
    circuit.nullifier = Some(nullifier);
    circuit.nullifier_seed = Some(seed);
    circuit.secret = Some(secret);
    circuit.address_bits = Some(address_bits);
    circuit.path = Some(path);

    let public_inputs = mixer_public_inputs(
        &root,
        &signal,
        &signal_variables,
        &external_nullifier,
        &nullifier,
    );
    Spend {
        circuit,
        public_inputs,
    }
}

#[test]
fn end_to_end_spend_proof() {
    let mut rng = ark_std::rand::rngs::StdRng::seed_from_u64(1337);
    let (pk, vk) = generate_keys(DEPTH, &mut rng).unwrap();

    let spend = sample_spend(&mut rng);
    assert_eq!(spend.public_inputs.len(), PACKED_PUBLIC_INPUTS);
    let proof = prove(&pk, spend.circuit, &mut rng).unwrap();

    assert!(verify(&vk, &spend.public_inputs, &proof).unwrap());

    // Shifting any single packed public input must break verification.
    for i in 0..PACKED_PUBLIC_INPUTS {
        let mut tampered = spend.public_inputs.clone();
        tampered[i] += Fr::from(1u64);
        assert!(!verify(&vk, &tampered, &proof).unwrap(), "input {i}");
    }

    // Serialization idempotence on the reference proof.
    let mut encoded = Vec::new();
    proof.serialize_compressed(&mut encoded).unwrap();
    let decoded: ark_groth16::Proof<ark_bn254::Bn254> =
        ark_groth16::Proof::deserialize_compressed(encoded.as_slice()).unwrap();
    let mut re_encoded = Vec::new();
    decoded.serialize_compressed(&mut re_encoded).unwrap();
    assert_eq!(encoded, re_encoded);
    assert!(verify(&vk, &spend.public_inputs, &decoded).unwrap());
}

#[test]
fn prove_rejects_mismatched_witness_lengths() {
    let mut rng = ark_std::rand::rngs::StdRng::seed_from_u64(2024);
    let (pk, _vk) = generate_keys(DEPTH, &mut rng).unwrap();
    let mut spend = sample_spend(&mut rng);
    spend.circuit.path = Some(vec![[0u8; 32]; DEPTH + 1]);
    assert!(matches!(
        prove(&pk, spend.circuit, &mut rng),
        Err(Error::WitnessLengthMismatch)
    ));
}
