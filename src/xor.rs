//! Generic construction and query core shared by the fingerprint widths.
//!
//! The filter is a table of three equal-length fingerprint blocks. Building
//! it means finding a seed under which the 3-uniform hypergraph spanned by
//! the keys' slot triples is peelable (Algorithm 3 in the paper), then
//! back-assigning fingerprints along the peeling order so that the XOR of
//! every key's three slots reproduces its fingerprint (Algorithm 4).

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::error::Error;
use crate::fingerprint::Fingerprint;
use crate::hashing::{self, HashedKey};
use crate::Filter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "bincode")]
use bincode::{Decode, Encode};

/// Reseeds attempted before construction is abandoned. A single attempt
/// succeeds with constant probability at the 1.23 load factor, so hitting
/// this budget means the input is pathological (usually: duplicate keys).
const MAX_BUILD_ATTEMPTS: u32 = 100;

/// Table entries per key. 3-uniform hypergraphs above this load factor are
/// peelable with high probability.
const TABLE_OVERHEAD: f64 = 1.23;

/// A slot of the transient construction table: XOR of all incident key
/// hashes and the slot's current degree. While `count == 1` the mask is
/// exactly the surviving incident key's hash.
#[derive(Clone, Copy, Default)]
struct XorSet {
    mask: u64,
    count: u32,
}

/// A peeled key: its hash and the slot it was peeled at.
#[derive(Clone, Copy)]
struct KeyIndex {
    hash: u64,
    index: usize,
}

/// An xor filter storing fingerprints of width `F`.
///
/// The width aliases [`Xor8`] and [`Xor16`] cover the supported fingerprint
/// types; see their documentation for space and false-positive figures.
///
/// All fields are public so callers can write their own serialization
/// envelope (`seed`, `block_length` and the raw fingerprints fully describe
/// a filter). The fingerprint buffer is exclusively owned and released when
/// the filter is dropped. Mutating the fields of a populated filter voids
/// the membership guarantees.
///
/// [`Xor8`]: crate::Xor8
/// [`Xor16`]: crate::Xor16
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorFilter<F> {
    /// The seed for the filter
    pub seed: u64,
    /// The number of fingerprints in each of the filter's three blocks
    pub block_length: usize,
    /// The fingerprints for the filter, blocks concatenated
    pub fingerprints: Box<[F]>,
}

impl<F: Fingerprint> XorFilter<F> {
    /// Sizes a filter for `n` keys and acquires its zeroed fingerprint
    /// table: `⌊1.23 · n⌋ + 32` entries, rounded down to a multiple of
    /// three. The additive slack absorbs small-`n` variance.
    ///
    /// The filter answers no queries usefully until [`populate`] has run.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailed`] if the table cannot be acquired.
    ///
    /// [`populate`]: XorFilter::populate
    pub fn allocate(n: u32) -> Result<Self, Error> {
        let capacity = (TABLE_OVERHEAD * n as f64) as usize + 32;
        let capacity = capacity / 3 * 3; // round down to a multiple of 3
        Ok(Self {
            seed: 0,
            block_length: capacity / 3,
            fingerprints: zeroed_table(capacity)?,
        })
    }

    /// Builds the filter over `keys`, replacing its seed and fingerprints.
    /// The table must have been sized by [`allocate`] for at least
    /// `keys.len()` keys.
    ///
    /// Keys must be distinct. Duplicates make every peeling attempt fail,
    /// so they surface as [`Error::BuildFailed`] once the reseed budget is
    /// spent; the builder never hangs on them. An empty key set is accepted
    /// and leaves the table zeroed, so queries then match only the ≈`2⁻ᵂ`
    /// fraction of keys whose truncated fingerprint is zero.
    ///
    /// Construction is deterministic: the same keys in the same order
    /// always produce bit-identical `seed` and `fingerprints`.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailed`] if a transient construction buffer
    /// cannot be acquired (the filter is untouched), or
    /// [`Error::BuildFailed`] if peeling does not converge within the
    /// budget (the fingerprints are then unspecified).
    ///
    /// [`allocate`]: XorFilter::allocate
    pub fn populate(&mut self, keys: &[u64]) -> Result<(), Error> {
        let block_length = self.block_length;
        let table_length = self.fingerprints.len();
        if table_length == 0 && !keys.is_empty() {
            // A zero-length table can never peel a non-empty key set.
            return Err(Error::BuildFailed);
        }

        // Transient construction state, scoped to this call.
        let mut sets: Vec<XorSet> = filled(table_length)?;
        let mut queue: Vec<usize> = reserved(table_length)?;
        let mut stack: Vec<KeyIndex> = reserved(keys.len())?;

        let mut rng = 1;
        let mut attempts = 0;
        loop {
            if attempts == MAX_BUILD_ATTEMPTS {
                return Err(Error::BuildFailed);
            }
            attempts += 1;
            self.seed = hashing::splitmix64(&mut rng);

            // Add every key to its three slots.
            for &key in keys {
                let HashedKey { hash, slots } = HashedKey::new(key, self.seed, block_length);
                for slot in slots {
                    sets[slot].mask ^= hash;
                    sets[slot].count += 1;
                }
            }

            // Seed the worklist with every degree-1 slot.
            for (slot, set) in sets.iter().enumerate() {
                if set.count == 1 {
                    queue.push(slot);
                }
            }

            // Peel. A slot may sit in the queue twice (entered at degree 1,
            // then lifted to 0 by a neighboring peel); the degree guard on
            // pop skips such stale entries.
            while let Some(slot) = queue.pop() {
                if sets[slot].count != 1 {
                    continue;
                }
                let hash = sets[slot].mask;
                stack.push(KeyIndex { hash, index: slot });

                // Remove the key from all three of its slots; the peeled
                // slot itself drops to degree 0 and is not re-enqueued.
                for other in hashing::slots_of(hash, block_length) {
                    sets[other].mask ^= hash;
                    sets[other].count -= 1;
                    if sets[other].count == 1 {
                        queue.push(other);
                    }
                }
            }

            if stack.len() == keys.len() {
                break;
            }

            // Peeling stalled; reset and retry under a fresh seed.
            sets.fill(XorSet::default());
            queue.clear();
            stack.clear();
        }

        // Assign fingerprints in reverse peeling order (most recently
        // peeled first). At each step the peeled slot still reads as zero,
        // so the three-way XOR over a key's slots lands on its fingerprint.
        self.fingerprints.fill(F::zero());
        for ki in stack.iter().rev() {
            let [h0, h1, h2] = hashing::slots_of(ki.hash, block_length);
            self.fingerprints[ki.index] = F::from_hash(hashing::fingerprint(ki.hash))
                ^ self.fingerprints[h0]
                ^ self.fingerprints[h1]
                ^ self.fingerprints[h2];
        }

        #[cfg(debug_assertions)]
        for &key in keys {
            assert!(
                self.contains(&key),
                "fingerprint assignment lost key {key}"
            );
        }

        Ok(())
    }

    /// Returns the memory held by the filter in bytes: the fingerprint
    /// table plus the filter header itself.
    pub fn size_in_bytes(&self) -> usize {
        self.fingerprints.len() * core::mem::size_of::<F>() + core::mem::size_of::<Self>()
    }
}

impl<F: Fingerprint> Default for XorFilter<F> {
    /// The well-defined empty state: no table, `block_length == 0`.
    ///
    /// An empty filter owns nothing and answers no queries; filters that
    /// answer queries come from [`allocate`] followed by [`populate`].
    ///
    /// [`allocate`]: XorFilter::allocate
    /// [`populate`]: XorFilter::populate
    fn default() -> Self {
        Self {
            seed: 0,
            block_length: 0,
            fingerprints: Box::default(),
        }
    }
}

impl<F: Fingerprint> Filter<u64> for XorFilter<F> {
    /// Returns `true` if the filter contains the specified key. Pure and
    /// allocation-free; has a false-positive rate of about `2⁻ᵂ`.
    #[inline]
    fn contains(&self, key: &u64) -> bool {
        let HashedKey {
            hash,
            slots: [h0, h1, h2],
        } = HashedKey::new(*key, self.seed, self.block_length);
        let fp = F::from_hash(hashing::fingerprint(hash));

        fp == (self.fingerprints[h0] ^ self.fingerprints[h1] ^ self.fingerprints[h2])
    }

    fn len(&self) -> usize {
        self.fingerprints.len()
    }
}

impl<F: Fingerprint> TryFrom<&[u64]> for XorFilter<F> {
    type Error = Error;

    /// Sizes, allocates and populates a filter over `keys` in one step.
    fn try_from(keys: &[u64]) -> Result<Self, Self::Error> {
        let n = u32::try_from(keys.len()).map_err(|_| Error::AllocationFailed)?;
        let mut filter = Self::allocate(n)?;
        filter.populate(keys)?;
        Ok(filter)
    }
}

impl<F: Fingerprint> TryFrom<&Vec<u64>> for XorFilter<F> {
    type Error = Error;

    fn try_from(v: &Vec<u64>) -> Result<Self, Self::Error> {
        Self::try_from(v.as_slice())
    }
}

impl<F: Fingerprint> TryFrom<Vec<u64>> for XorFilter<F> {
    type Error = Error;

    fn try_from(v: Vec<u64>) -> Result<Self, Self::Error> {
        Self::try_from(v.as_slice())
    }
}

/// Acquires a zeroed fingerprint table without aborting on exhaustion.
fn zeroed_table<F: Fingerprint>(len: usize) -> Result<Box<[F]>, Error> {
    let mut table = Vec::new();
    table
        .try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailed)?;
    table.resize(len, F::zero());
    Ok(table.into_boxed_slice())
}

/// Acquires a buffer of `len` default entries.
fn filled<T: Copy + Default>(len: usize) -> Result<Vec<T>, Error> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailed)?;
    buf.resize(len, T::default());
    Ok(buf)
}

/// Acquires an empty buffer with room for `capacity` entries.
fn reserved<T>(capacity: usize) -> Result<Vec<T>, Error> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(capacity)
        .map_err(|_| Error::AllocationFailed)?;
    Ok(buf)
}
