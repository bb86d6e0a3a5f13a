//! Immutable approximate-membership sets built on xor filters.
//!
//! An xor filter represents a static set of 64-bit keys and answers
//! membership queries with no false negatives and a false-positive rate of
//! about `2⁻ᵂ` for fingerprint width `W`, storing roughly `1.23 · W` bits
//! per key. A filter is sized with [`XorFilter::allocate`], built once from
//! a complete key set with [`XorFilter::populate`], and never changes
//! afterwards; see [Xor Filters: Faster and Smaller Than Bloom and Cuckoo
//! Filters] for the construction.
//!
//! ```
//! use xorset::{Filter, Xor8};
//!
//! let keys: Vec<u64> = (1..=10_000).collect();
//! let filter = Xor8::try_from(&keys).unwrap();
//!
//! // no false negatives
//! assert!(keys.iter().all(|key| filter.contains(key)));
//! ```
//!
//! Keys must be distinct; callers hash non-integer keys down to `u64`
//! themselves before building a filter.
//!
//! [Xor Filters: Faster and Smaller Than Bloom and Cuckoo Filters]: https://arxiv.org/abs/1912.08258

#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

mod error;
mod fingerprint;
mod hashing;
mod xor;
mod xor16;
mod xor8;

pub use error::Error;
pub use fingerprint::Fingerprint;
pub use xor::XorFilter;
pub use xor16::Xor16;
pub use xor8::Xor8;

/// Methods common to filters.
pub trait Filter<N> {
    /// Returns `true` if the filter probably contains the specified key.
    fn contains(&self, key: &N) -> bool;

    /// Returns the number of fingerprint entries in the filter.
    fn len(&self) -> usize;

    /// Returns `true` if the filter stores no fingerprint entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
