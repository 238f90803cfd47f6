use ark_bn254::{Bn254, Fr};
use ark_groth16::Groth16;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::{
    ConstraintSynthesizer, ConstraintSystem, ConstraintSystemRef, SynthesisError,
};
use ark_snark::SNARK;
use ark_std::rand::SeedableRng;

use miximus::constants::merkle_tree_ivs;
use miximus::gadgets::merkle::{merkle_path_authenticator, LongsightL12Mp};
use miximus::MerkleTree;

#[test]
fn authenticator_round_trips_every_leaf() {
    let mut tree = MerkleTree::new(8);
    for i in 0..8u64 {
        tree.append(Fr::from(1000 + i)).unwrap();
    }
    let root = tree.root().unwrap();
    let ivs = merkle_tree_ivs(tree.depth());

    for i in 0..8 {
        let proof = tree.proof(i).unwrap();
        assert!(proof.verify(tree.hasher(), root));

        let cs = ConstraintSystem::<Fr>::new_ref();
        let leaf = FpVar::new_witness(cs.clone(), || Ok(proof.leaf)).unwrap();
        let root_var = FpVar::new_witness(cs.clone(), || Ok(root)).unwrap();
        let path: Vec<FpVar<Fr>> = proof
            .path
            .iter()
            .map(|p| FpVar::new_witness(cs.clone(), || Ok(*p)).unwrap())
            .collect();
        let address: Vec<Boolean<Fr>> = proof
            .address
            .iter()
            .map(|b| Boolean::new_witness(cs.clone(), || Ok(*b)).unwrap())
            .collect();
        merkle_path_authenticator::<LongsightL12Mp>(&address, &leaf, &root_var, &path, &ivs)
            .unwrap();
        assert!(cs.is_satisfied().unwrap(), "leaf {i}");
    }
}

#[test]
fn any_flipped_address_bit_is_rejected() {
    let mut tree = MerkleTree::new(8);
    for i in 0..8u64 {
        tree.append(Fr::from(2000 + i)).unwrap();
    }
    let root = tree.root().unwrap();
    let ivs = merkle_tree_ivs(tree.depth());
    let proof = tree.proof(5).unwrap();

    for flip in 0..tree.depth() {
        let cs = ConstraintSystem::<Fr>::new_ref();
        let leaf = FpVar::new_witness(cs.clone(), || Ok(proof.leaf)).unwrap();
        let root_var = FpVar::new_witness(cs.clone(), || Ok(root)).unwrap();
        let path: Vec<FpVar<Fr>> = proof
            .path
            .iter()
            .map(|p| FpVar::new_witness(cs.clone(), || Ok(*p)).unwrap())
            .collect();
        let address: Vec<Boolean<Fr>> = proof
            .address
            .iter()
            .enumerate()
            .map(|(j, b)| {
                let bit = if j == flip { !*b } else { *b };
                Boolean::new_witness(cs.clone(), || Ok(bit)).unwrap()
            })
            .collect();
        merkle_path_authenticator::<LongsightL12Mp>(&address, &leaf, &root_var, &path, &ivs)
            .unwrap();
        assert!(!cs.is_satisfied().unwrap(), "flipped bit {flip}");
    }
}

#[test]
fn partially_filled_tree_still_authenticates() {
    // Absent siblings take their unique defaults; proofs must still verify.
    let mut tree = MerkleTree::new(16);
    for i in 0..3u64 {
        tree.append(Fr::from(i + 1)).unwrap();
    }
    let root = tree.root().unwrap();
    let ivs = merkle_tree_ivs(tree.depth());
    let proof = tree.proof(2).unwrap();

    let cs = ConstraintSystem::<Fr>::new_ref();
    let leaf = FpVar::new_witness(cs.clone(), || Ok(proof.leaf)).unwrap();
    let root_var = FpVar::new_witness(cs.clone(), || Ok(root)).unwrap();
    let path: Vec<FpVar<Fr>> = proof
        .path
        .iter()
        .map(|p| FpVar::new_witness(cs.clone(), || Ok(*p)).unwrap())
        .collect();
    let address: Vec<Boolean<Fr>> = proof
        .address
        .iter()
        .map(|b| Boolean::new_witness(cs.clone(), || Ok(*b)).unwrap())
        .collect();
    merkle_path_authenticator::<LongsightL12Mp>(&address, &leaf, &root_var, &path, &ivs).unwrap();
    assert!(cs.is_satisfied().unwrap());
}

/// Prove membership of a private leaf under a public root.
#[derive(Clone)]
struct MembershipCircuit {
    depth: usize,
    root: Option<Fr>,
    leaf: Option<Fr>,
    address: Option<Vec<bool>>,
    path: Option<Vec<Fr>>,
}

impl ConstraintSynthesizer<Fr> for MembershipCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        let root = FpVar::new_input(cs.clone(), || {
            self.root.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let leaf = FpVar::new_witness(cs.clone(), || {
            self.leaf.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let mut address = Vec::with_capacity(self.depth);
        let mut path = Vec::with_capacity(self.depth);
        for i in 0..self.depth {
            address.push(Boolean::new_witness(cs.clone(), || {
                self.address
                    .as_ref()
                    .and_then(|v| v.get(i))
                    .copied()
                    .ok_or(SynthesisError::AssignmentMissing)
            })?);
            path.push(FpVar::new_witness(cs.clone(), || {
                self.path
                    .as_ref()
                    .and_then(|v| v.get(i))
                    .copied()
                    .ok_or(SynthesisError::AssignmentMissing)
            })?);
        }
        let ivs = merkle_tree_ivs(self.depth);
        merkle_path_authenticator::<LongsightL12Mp>(&address, &leaf, &root, &path, &ivs)?;
        Ok(())
    }
}

#[test]
fn groth16_round_trip_for_membership() {
    let mut rng = ark_std::rand::rngs::StdRng::seed_from_u64(21);
    let depth = 3;
    let blank = MembershipCircuit {
        depth,
        root: None,
        leaf: None,
        address: None,
        path: None,
    };
    let (pk, vk) = Groth16::<Bn254>::circuit_specific_setup(blank, &mut rng).unwrap();

    let mut tree = MerkleTree::new(8);
    for i in 0..8u64 {
        tree.append(Fr::from(3000 + i)).unwrap();
    }
    let root = tree.root().unwrap();
    let proof_data = tree.proof(6).unwrap();
    let circuit = MembershipCircuit {
        depth,
        root: Some(root),
        leaf: Some(proof_data.leaf),
        address: Some(proof_data.address),
        path: Some(proof_data.path),
    };
    let proof = Groth16::<Bn254>::prove(&pk, circuit, &mut rng).unwrap();
    let pvk = Groth16::<Bn254>::process_vk(&vk).unwrap();
    assert!(Groth16::<Bn254>::verify_with_processed_vk(&pvk, &[root], &proof).unwrap());
    assert!(!Groth16::<Bn254>::verify_with_processed_vk(
        &pvk,
        &[root + Fr::from(1u64)],
        &proof
    )
    .unwrap());
}
