//! Fingerprint widths a filter can store.

use num_traits::{PrimInt, Unsigned};

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
}

/// An unsigned integer type used to store fingerprints.
///
/// The trait is sealed: filters support 8-bit and 16-bit fingerprints only.
/// Widening the fingerprint trades space for a lower false-positive rate,
/// roughly `2⁻ᵂ` for width `W`.
pub trait Fingerprint: PrimInt + Unsigned + sealed::Sealed {
    /// Truncates a 64-bit fingerprint to the stored width.
    fn from_hash(hash: u64) -> Self;
}

impl Fingerprint for u8 {
    #[inline]
    fn from_hash(hash: u64) -> Self {
        hash as u8
    }
}

impl Fingerprint for u16 {
    #[inline]
    fn from_hash(hash: u64) -> Self {
        hash as u16
    }
}
