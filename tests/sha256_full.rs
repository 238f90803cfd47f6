use ark_bn254::Fr;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::ConstraintSystem;
use sha2::{Digest, Sha256};

use miximus::gadgets::sha256::{sha256_block_native, sha256_full_gadget, BLOCK_BYTES};

/// Reference digest for the block formed by duplicating SHA256("test").
const EXPECTED: [u8; 32] = [
    0xD2, 0x94, 0xF6, 0xE5, 0x85, 0x87, 0x4F, 0xE6, 0x40, 0xBE, 0x4C, 0xE6, 0x36, 0xE6, 0xEF,
    0x9E, 0x3A, 0xDC, 0x27, 0x62, 0x0A, 0xA3, 0x22, 0x1F, 0xDC, 0xF5, 0xC0, 0xA7, 0xC1, 0x1C,
    0x6F, 0x67,
];

fn test_block() -> [u8; BLOCK_BYTES] {
    let half: [u8; 32] = Sha256::digest(b"test").into();
    let mut block = [0u8; BLOCK_BYTES];
    block[..32].copy_from_slice(&half);
    block[32..].copy_from_slice(&half);
    block
}

#[test]
fn native_full_round_matches_the_reference_digest() {
    assert_eq!(sha256_block_native(&test_block()), EXPECTED);
}

#[test]
fn gadget_matches_the_reference_digest() {
    let cs = ConstraintSystem::<Fr>::new_ref();
    let block_vars = UInt8::new_witness_vec(cs.clone(), &test_block()).unwrap();
    let digest = sha256_full_gadget(&block_vars).unwrap();
    let digest_bytes: Vec<u8> = digest.iter().map(|b| b.value().unwrap()).collect();
    assert_eq!(digest_bytes, EXPECTED.to_vec());
    assert!(cs.is_satisfied().unwrap());
}

#[test]
fn forced_wrong_digest_is_unsatisfiable() {
    let cs = ConstraintSystem::<Fr>::new_ref();
    let block_vars = UInt8::new_witness_vec(cs.clone(), &test_block()).unwrap();
    let digest = sha256_full_gadget(&block_vars).unwrap();
    let mut wrong = EXPECTED;
    wrong[0] ^= 1;
    let claimed = UInt8::new_witness_vec(cs.clone(), &wrong).unwrap();
    digest.as_slice().enforce_equal(claimed.as_slice()).unwrap();
    assert!(!cs.is_satisfied().unwrap());
}
