//! Seeded 64-bit hash kernel shared by filter construction and queries.
//!
//! All arithmetic is wrapping and unsigned so that hashes are bit-exact
//! across hosts; the slot derivation below is part of the filter's on-table
//! layout and must not change between building and querying.

/// Applies [`MurmurHash3`]'s finalization mix to a randomly-seeded key,
/// causing bits to [avalanche]. This keeps false-positive ratios low even
/// for poorly distributed key sets.
///
/// [`MurmurHash3`]: https://github.com/spaolacci/murmur3
/// [avalanche]: https://en.wikipedia.org/wiki/Avalanche_effect
///
/// Copyright 2013, Sébastien Paolacci.
/// All rights reserved.
///
/// Redistribution and use in source and binary forms, with or without
/// modification, are permitted provided that the following conditions are met:
///     * Redistributions of source code must retain the above copyright
///       notice, this list of conditions and the following disclaimer.
///     * Redistributions in binary form must reproduce the above copyright
///       notice, this list of conditions and the following disclaimer in the
///       documentation and/or other materials provided with the distribution.
///     * Neither the name of the library nor the
///       names of its contributors may be used to endorse or promote products
///       derived from this software without specific prior written permission.
///
/// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS" AND
/// ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE IMPLIED
/// WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
/// DISCLAIMED. IN NO EVENT SHALL <COPYRIGHT HOLDER> BE LIABLE FOR ANY
/// DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES
/// (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES;
/// LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND
/// ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT
/// (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE OF THIS
/// SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
pub const fn mix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51_afd7_ed55_8ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    k ^= k >> 33;
    k
}

/// Pseudo-RNG using Sebastiano Vigna's [`SplitMix64`] algorithm, used only
/// to derive and refresh the filter seed between peeling attempts.
///
/// [`SplitMix64`]: http://xoroshiro.di.unimi.it/splitmix64.c
///
/// Written in 2015 by Sebastiano Vigna (vigna@acm.org)
///
/// To the extent possible under law, the author has dedicated all copyright and related and
/// neighboring rights to this software to the public domain worldwide. This software is
/// distributed without any warranty.
///
/// See <http://creativecommons.org/publicdomain/zero/1.0/>.
pub fn splitmix64(state: &mut u64) -> u64 {
    *state = (*state).wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Avalanched hash of `key` under `seed`. The seed is folded in with a
/// wrapping add before finalization.
#[inline]
pub const fn mix(key: u64, seed: u64) -> u64 {
    mix64(key.wrapping_add(seed))
}

/// [A fast alternative to the modulo reduction]: maps a 32-bit hash
/// approximately uniformly onto `[0, n)` by taking the high bits of a
/// 64-bit multiply.
///
/// [A fast alternative to the modulo reduction]: http://lemire.me/blog/2016/06/27/a-fast-alternative-to-the-modulo-reduction/
#[inline]
pub const fn reduce(x: u32, n: usize) -> usize {
    ((x as u64 * n as u64) >> 32) as usize
}

/// Folds a 64-bit hash into the value stored in the fingerprint table.
/// Truncation to the stored width happens at the store site.
#[inline]
pub const fn fingerprint(hash: u64) -> u64 {
    hash ^ (hash >> 32)
}

/// Absolute slots of `hash` in the concatenated fingerprint table: one slot
/// per `block_length`-sized block, so the three slots of a key never
/// collide with each other.
#[inline]
pub const fn slots_of(hash: u64, block_length: usize) -> [usize; 3] {
    [
        reduce(hash as u32, block_length),
        block_length + reduce(hash.rotate_left(21) as u32, block_length),
        2 * block_length + reduce(hash.rotate_left(42) as u32, block_length),
    ]
}

/// The hash of a key and the three table slots it occupies.
pub struct HashedKey {
    /// Avalanched key hash.
    pub hash: u64,
    /// Absolute slot indices, one per block.
    pub slots: [usize; 3],
}

impl HashedKey {
    /// Hashes `key` under `seed` and derives its slots in a table of three
    /// `block_length`-sized blocks.
    #[inline]
    pub const fn new(key: u64, seed: u64, block_length: usize) -> Self {
        let hash = mix(key, seed);
        Self {
            hash,
            slots: slots_of(hash, block_length),
        }
    }
}
