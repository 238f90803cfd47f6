//! Native append-only Merkle tree over the Longsight MP pair hash.
//!
//! Witness-side counterpart of [`crate::gadgets::merkle`]: builds the tree,
//! extracts authentication paths, and fills absent siblings with unique
//! per-position defaults so that a partially filled tree still has a
//! well-defined root.

use ark_bn254::Fr;
use ark_ff::PrimeField;
use sha2::{Digest, Sha256};

use crate::constants::merkle_tree_ivs;
use crate::error::{Error, Result};
use crate::longsight::longsight_l12p5_mp;

/// Pair hasher with per-level IVs and deterministic absent-node defaults.
pub struct LongsightMerkleHasher {
    ivs: Vec<Fr>,
}

impl LongsightMerkleHasher {
    pub fn new(tree_depth: usize) -> Self {
        Self {
            ivs: merkle_tree_ivs(tree_depth),
        }
    }

    pub fn hash_pair(&self, depth: usize, left: Fr, right: Fr) -> Fr {
        longsight_l12p5_mp(self.ivs[depth], &[left, right])
    }

    /// Default value for a tree position that holds no appended leaf yet.
    pub fn unique(&self, depth: usize, index: u64) -> Fr {
        let mut h = Sha256::new();
        h.update((depth as u16).to_be_bytes());
        let mut index_bytes = [0u8; 30];
        index_bytes[22..].copy_from_slice(&index.to_be_bytes());
        h.update(index_bytes);
        Fr::from_be_bytes_mod_order(&h.finalize())
    }
}

/// An extracted authentication path.
///
/// `address[i]` is true when the running value is the right child at level
/// `i`; `path[i]` is the sibling hashed against it.
#[derive(Clone, Debug)]
pub struct MerkleProof {
    pub leaf: Fr,
    pub address: Vec<bool>,
    pub path: Vec<Fr>,
}

impl MerkleProof {
    pub fn verify(&self, hasher: &LongsightMerkleHasher, root: Fr) -> bool {
        let mut item = self.leaf;
        for (depth, (is_right, node)) in self.address.iter().zip(&self.path).enumerate() {
            item = if *is_right {
                hasher.hash_pair(depth, *node, item)
            } else {
                hasher.hash_pair(depth, item, *node)
            };
        }
        item == root
    }
}

/// Append-only Merkle tree of fixed capacity.
pub struct MerkleTree {
    depth: usize,
    n_items: usize,
    cur: usize,
    levels: Vec<Vec<Fr>>,
    hasher: LongsightMerkleHasher,
}

impl MerkleTree {
    /// Tree with room for `n_items` leaves; depth is ⌈log₂ n_items⌉.
    pub fn new(n_items: usize) -> Self {
        assert!(n_items > 1, "tree must hold at least two items");
        let depth = n_items.next_power_of_two().trailing_zeros() as usize;
        Self {
            depth,
            n_items,
            cur: 0,
            levels: vec![Vec::new(); depth + 1],
            hasher: LongsightMerkleHasher::new(depth),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn len(&self) -> usize {
        self.cur
    }

    pub fn is_empty(&self) -> bool {
        self.cur == 0
    }

    pub fn hasher(&self) -> &LongsightMerkleHasher {
        &self.hasher
    }

    /// Append a leaf, updating the spine above it. Returns the leaf index.
    pub fn append(&mut self, leaf: Fr) -> Result<usize> {
        if self.cur >= self.n_items {
            return Err(Error::TreeFull);
        }
        self.levels[0].push(leaf);
        self.update_spine();
        self.cur += 1;
        Ok(self.cur - 1)
    }

    fn node(&self, depth: usize, offset: usize) -> Fr {
        match self.levels[depth].get(offset) {
            Some(v) => *v,
            None => self.hasher.unique(depth, offset as u64),
        }
    }

    fn update_spine(&mut self) {
        let mut index = self.cur;
        for depth in 0..self.depth {
            let (left, right) = if index % 2 == 0 {
                (self.node(depth, index), self.node(depth, index + 1))
            } else {
                (self.node(depth, index - 1), self.node(depth, index))
            };
            let parent = self.hasher.hash_pair(depth, left, right);
            let parent_index = index / 2;
            if self.levels[depth + 1].len() == parent_index {
                self.levels[depth + 1].push(parent);
            } else {
                self.levels[depth + 1][parent_index] = parent;
            }
            index = parent_index;
        }
    }

    pub fn proof(&self, index: usize) -> Result<MerkleProof> {
        if index >= self.cur {
            return Err(Error::LeafOutOfRange);
        }
        let leaf = self.levels[0][index];
        let mut address = Vec::with_capacity(self.depth);
        let mut path = Vec::with_capacity(self.depth);
        let mut idx = index;
        for depth in 0..self.depth {
            let sibling = if idx % 2 == 0 { idx + 1 } else { idx - 1 };
            address.push(idx % 2 == 1);
            path.push(self.node(depth, sibling));
            idx /= 2;
        }
        Ok(MerkleProof {
            leaf,
            address,
            path,
        })
    }

    pub fn root(&self) -> Option<Fr> {
        if self.cur == 0 {
            None
        } else {
            self.levels[self.depth].first().copied()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proofs_verify_for_every_leaf() {
        let mut tree = MerkleTree::new(8);
        for i in 0..5u64 {
            tree.append(Fr::from(100 + i)).unwrap();
        }
        let root = tree.root().unwrap();
        for i in 0..5 {
            let proof = tree.proof(i).unwrap();
            assert!(proof.verify(tree.hasher(), root));
        }
    }

    #[test]
    fn appending_changes_the_root() {
        let mut tree = MerkleTree::new(4);
        tree.append(Fr::from(1u64)).unwrap();
        let r1 = tree.root().unwrap();
        tree.append(Fr::from(2u64)).unwrap();
        let r2 = tree.root().unwrap();
        assert_ne!(r1, r2);
    }

    #[test]
    fn full_tree_rejects_appends() {
        let mut tree = MerkleTree::new(2);
        tree.append(Fr::from(1u64)).unwrap();
        tree.append(Fr::from(2u64)).unwrap();
        assert!(matches!(tree.append(Fr::from(3u64)), Err(Error::TreeFull)));
    }

    #[test]
    fn proof_for_missing_leaf_rejected() {
        let mut tree = MerkleTree::new(4);
        tree.append(Fr::from(1u64)).unwrap();
        assert!(matches!(tree.proof(3), Err(Error::LeafOutOfRange)));
    }

    #[test]
    fn tampered_path_fails_verification() {
        let mut tree = MerkleTree::new(4);
        tree.append(Fr::from(1u64)).unwrap();
        tree.append(Fr::from(2u64)).unwrap();
        let root = tree.root().unwrap();
        let mut proof = tree.proof(0).unwrap();
        proof.path[0] += Fr::from(1u64);
        assert!(!proof.verify(tree.hasher(), root));
    }
}
