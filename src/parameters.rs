//! Filter sizing: bucket count and hash family, with validation and the
//! usual Bloom filter estimates.

use crate::filter::{HashFamily, HashFunction};
use std::collections::HashSet;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterParameters {
    /// Number of buckets (bits) in the filter.
    pub num_buckets: usize, // m
    /// Ordered hash functions; each sets or tests one bucket.
    pub hash_family: HashFamily, // k = hash_family.len()
}

impl fmt::Display for FilterParameters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "FilterParameters(m={} (buckets), k={} (hash functions: {}))",
            self.num_buckets,
            self.hash_family.len(),
            self.hash_family,
        )
    }
}

quick_error! {
    #[derive(Debug)]
    pub enum ParametersError {
        NoBuckets {}
        NoHashFunctions {}
        ZeroRounds {}
        DuplicateHashFunction(function: HashFunction) {
            display("hash function {} appears more than once", function)
        }
        InvalidFalsePositiveRate {}
    }
}

impl FilterParameters {
    pub const DEFAULT_BUCKETS: usize = 10_000;

    pub fn new(num_buckets: usize, hash_family: HashFamily) -> Result<FilterParameters, ParametersError> {
        let parameters = FilterParameters {
            num_buckets,
            hash_family,
        };
        parameters.is_valid()?;
        Ok(parameters)
    }

    /// The default four-function family over `num_buckets` buckets.
    pub fn from_buckets(num_buckets: usize) -> Result<FilterParameters, ParametersError> {
        FilterParameters::new(num_buckets, HashFamily::default())
    }

    /// Sizes the bucket array for `expected_elements` insertions at the given
    /// false positive rate, keeping the default family:
    /// m = ceil(-n ln p / (ln 2)^2).
    pub fn for_capacity(expected_elements: usize, target_fpr: f64) -> Result<FilterParameters, ParametersError> {
        if !(target_fpr > 0.0 && target_fpr < 1.0) {
            return Err(ParametersError::InvalidFalsePositiveRate);
        }
        let ln2_squared = std::f64::consts::LN_2 * std::f64::consts::LN_2;
        let m = (-(expected_elements as f64) * target_fpr.ln() / ln2_squared).ceil() as usize;
        FilterParameters::from_buckets(m.max(1))
    }

    /// Inserted elements times hash functions over buckets.
    pub fn load_factor(&self, elements: usize) -> f64 {
        (elements * self.hash_family.len()) as f64 / self.num_buckets as f64
    }

    /// (1 - e^(-kn/m))^k
    pub fn estimated_false_positive_rate(&self, elements: usize) -> f64 {
        let k = self.hash_family.len() as f64;
        (1.0 - (-self.load_factor(elements)).exp()).powf(k)
    }

    pub fn is_valid(&self) -> Result<(), ParametersError> {
        if self.num_buckets == 0 {
            return Err(ParametersError::NoBuckets);
        }
        if self.hash_family.is_empty() {
            return Err(ParametersError::NoHashFunctions);
        }
        let mut seen = HashSet::new();
        for function in self.hash_family.functions() {
            if let HashFunction::Iterated(0) = function {
                return Err(ParametersError::ZeroRounds);
            }
            if !seen.insert(*function) {
                return Err(ParametersError::DuplicateHashFunction(*function));
            }
        }
        Ok(())
    }
}

impl Default for FilterParameters {
    fn default() -> FilterParameters {
        FilterParameters {
            num_buckets: FilterParameters::DEFAULT_BUCKETS,
            hash_family: HashFamily::default(),
        }
    }
}
