//! Merkle tree over MD5 for integrity checks and locating a corrupted leaf.
//!
//! Leaves hash their raw bytes; a parent hashes the concatenated hex text of
//! its two children.
use super::{digest, Digest, Md5};

quick_error! {
    #[derive(Debug)]
    pub enum MerkleError {
        Empty {}
        NotPowerOfTwo(leaves: usize) {
            display("{} leaves is not a power of two", leaves)
        }
        Mismatch(level: usize, index: usize) {
            display("node {} at level {} does not match its children", index, level)
        }
        ShapeMismatch {}
    }
}

#[derive(Clone, Debug)]
pub struct MerkleTree {
    // levels[0] holds the leaf hashes, the last level holds the root.
    levels: Vec<Vec<Digest>>,
}

fn parent_hash(left: &Digest, right: &Digest) -> Digest {
    let mut hasher = Md5::new();
    hasher.update(left.to_hex().as_bytes());
    hasher.update(right.to_hex().as_bytes());
    hasher.finalize()
}

impl MerkleTree {
    pub fn build<T: AsRef<[u8]>>(leaves: &[T]) -> Result<MerkleTree, MerkleError> {
        Self::from_leaf_hashes(leaves.iter().map(|leaf| digest(leaf.as_ref())).collect())
    }

    pub fn from_leaf_hashes(leaves: Vec<Digest>) -> Result<MerkleTree, MerkleError> {
        if leaves.is_empty() {
            return Err(MerkleError::Empty);
        }
        if !leaves.len().is_power_of_two() {
            return Err(MerkleError::NotPowerOfTwo(leaves.len()));
        }

        let mut levels = vec![leaves];
        while levels[levels.len() - 1].len() > 1 {
            let next = levels[levels.len() - 1]
                .chunks_exact(2)
                .map(|pair| parent_hash(&pair[0], &pair[1]))
                .collect();
            levels.push(next);
        }
        Ok(MerkleTree { levels })
    }

    pub fn root(&self) -> Digest {
        self.levels[self.levels.len() - 1][0]
    }

    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Recomputes every parent from its children and reports the first node,
    /// scanning from the leaves up, whose stored hash disagrees.
    pub fn validate(&self) -> Result<(), MerkleError> {
        for level in 1..self.levels.len() {
            let children = &self.levels[level - 1];
            for (index, node) in self.levels[level].iter().enumerate() {
                if parent_hash(&children[2 * index], &children[2 * index + 1]) != *node {
                    return Err(MerkleError::Mismatch(level, index));
                }
            }
        }
        Ok(())
    }

    /// Walks down from the root towards the leaf where `self` first differs
    /// from `trusted`, taking the left branch whenever the left children
    /// differ. Returns `None` if the roots agree.
    pub fn find_corrupted_leaf(&self, trusted: &MerkleTree) -> Result<Option<usize>, MerkleError> {
        if self.levels.len() != trusted.levels.len() || self.leaf_count() != trusted.leaf_count() {
            return Err(MerkleError::ShapeMismatch);
        }
        if self.root() == trusted.root() {
            return Ok(None);
        }

        let mut index = 0;
        for level in (0..self.levels.len() - 1).rev() {
            let left = 2 * index;
            index = if self.levels[level][left] != trusted.levels[level][left] {
                left
            } else {
                left + 1
            };
        }
        Ok(Some(index))
    }
}
