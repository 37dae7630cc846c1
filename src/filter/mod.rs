//! Insert-only Bloom filter whose hash functions are all derived from MD5.
//!
//! Values are mapped to buckets by reading a function's digest as a 128-bit
//! big-endian integer and reducing it modulo the bucket count. The filter
//! never reports a false negative; false positives depend on the load factor.
use crate::hash::{digest, Digest, Md5};
use crate::parameters::{FilterParameters, ParametersError};
use bitvec::prelude::*;
use std::fmt;

/// Iteration counts of the default family.
pub const DEFAULT_ROUNDS: [u32; 4] = [1, 15, 7, 54];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HashFunction {
    /// MD5 applied `rounds` times; every round after the first hashes the
    /// hex text of the previous digest.
    Iterated(u32),
    /// A single MD5 over the little-endian salt followed by the value.
    Salted(u32),
}

impl HashFunction {
    pub fn digest(&self, value: &[u8]) -> Digest {
        match *self {
            HashFunction::Iterated(rounds) => {
                let mut output = digest(value);
                for _ in 1..rounds {
                    output = digest(output.to_hex().as_bytes());
                }
                output
            }
            HashFunction::Salted(salt) => {
                let mut hasher = Md5::new();
                hasher.update(&salt.to_le_bytes());
                hasher.update(value);
                hasher.finalize()
            }
        }
    }

    pub fn index(&self, value: &[u8], num_buckets: usize) -> usize {
        (self.digest(value).to_u128() % num_buckets as u128) as usize
    }
}

impl fmt::Display for HashFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HashFunction::Iterated(rounds) => write!(f, "md5^{}", rounds),
            HashFunction::Salted(salt) => write!(f, "md5[salt={}]", salt),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashFamily {
    functions: Vec<HashFunction>,
}

impl HashFamily {
    pub fn new(functions: Vec<HashFunction>) -> HashFamily {
        HashFamily { functions }
    }

    pub fn iterated(rounds: &[u32]) -> HashFamily {
        HashFamily::new(rounds.iter().map(|r| HashFunction::Iterated(*r)).collect())
    }

    /// `k` functions separated by the salts `0..k`.
    pub fn salted(k: u32) -> HashFamily {
        HashFamily::new((0..k).map(HashFunction::Salted).collect())
    }

    pub fn functions(&self) -> &[HashFunction] {
        &self.functions
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl Default for HashFamily {
    fn default() -> HashFamily {
        HashFamily::iterated(&DEFAULT_ROUNDS)
    }
}

impl fmt::Display for HashFamily {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let names: Vec<String> = self.functions.iter().map(|h| h.to_string()).collect();
        f.write_str(&names.join(", "))
    }
}

/// The distributable structure: `m` buckets plus the hash family needed to
/// recompute bucket indices. Only the server's build phase inserts; clients
/// hold a copy and only call [`MembershipFilter::contains`].
#[derive(Clone, Debug)]
pub struct MembershipFilter {
    bits: BitVec<u8, Lsb0>,
    hash_family: HashFamily,
    inserted: usize,
}

impl MembershipFilter {
    pub fn new(parameters: &FilterParameters) -> Result<MembershipFilter, ParametersError> {
        parameters.is_valid()?;
        Ok(MembershipFilter {
            bits: bitvec![u8, Lsb0; 0; parameters.num_buckets],
            hash_family: parameters.hash_family.clone(),
            inserted: 0,
        })
    }

    /// An empty filter with the default family.
    pub fn build(num_buckets: usize) -> Result<MembershipFilter, ParametersError> {
        MembershipFilter::new(&FilterParameters::from_buckets(num_buckets)?)
    }

    pub fn insert(&mut self, value: &[u8]) {
        let num_buckets = self.num_buckets();
        for function in self.hash_family.functions() {
            self.bits.set(function.index(value, num_buckets), true);
        }
        self.inserted += 1;
    }

    /// Stops at the first function whose bucket is unset.
    pub fn contains(&self, value: &[u8]) -> bool {
        let num_buckets = self.num_buckets();
        self.hash_family
            .functions()
            .iter()
            .all(|function| self.bits[function.index(value, num_buckets)])
    }

    /// Bucket index of `value` under each function, in family order.
    pub fn positions(&self, value: &[u8]) -> Vec<usize> {
        let num_buckets = self.num_buckets();
        self.hash_family
            .functions()
            .iter()
            .map(|function| function.index(value, num_buckets))
            .collect()
    }

    pub fn num_buckets(&self) -> usize {
        self.bits.len()
    }

    pub fn hash_family(&self) -> &HashFamily {
        &self.hash_family
    }

    pub fn hash_count(&self) -> usize {
        self.hash_family.len()
    }

    pub fn bits(&self) -> &BitSlice<u8, Lsb0> {
        &self.bits
    }

    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Number of insert calls, duplicates included.
    pub fn inserted(&self) -> usize {
        self.inserted
    }

    pub fn parameters(&self) -> FilterParameters {
        FilterParameters {
            num_buckets: self.num_buckets(),
            hash_family: self.hash_family.clone(),
        }
    }

    pub fn load_factor(&self) -> f64 {
        self.parameters().load_factor(self.inserted)
    }

    pub fn estimated_false_positive_rate(&self) -> f64 {
        self.parameters().estimated_false_positive_rate(self.inserted)
    }
}
