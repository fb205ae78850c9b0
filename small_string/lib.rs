// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A 7-byte small string optimisation used by the engine's string and
//! property-key representations to avoid a heap allocation for short
//! identifiers, numeric literals, and one-character strings.
//!
//! The backing storage is a fixed `[u8; 7]` array holding UTF-8 bytes,
//! padded on the right with `0xFF`. `0xFF` never appears in well-formed
//! UTF-8, so the first `0xFF` byte (or the end of the array, for a
//! string that fills all seven bytes) unambiguously marks the end of
//! the stored text.

use std::fmt;
use std::hash::{Hash, Hasher};

pub const SMALL_STRING_MAX_LEN: usize = 7;
const TERMINATOR: u8 = 0xFF;

#[derive(Clone, Copy, Eq)]
pub struct SmallString {
    bytes: [u8; SMALL_STRING_MAX_LEN],
}

impl SmallString {
    /// Returns `None` if `s` does not fit (UTF-8 byte length > 7).
    pub fn from_str(s: &str) -> Option<Self> {
        if s.len() > SMALL_STRING_MAX_LEN {
            return None;
        }
        let mut bytes = [TERMINATOR; SMALL_STRING_MAX_LEN];
        bytes[..s.len()].copy_from_slice(s.as_bytes());
        Some(Self { bytes })
    }

    /// ## Panics
    /// Panics if `s` does not fit in 7 bytes. Callers must have already
    /// checked the length (e.g. via a `from_str` call site or a literal).
    pub const fn from_str_unchecked(s: &str) -> Self {
        let src = s.as_bytes();
        assert!(src.len() <= SMALL_STRING_MAX_LEN);
        let mut bytes = [TERMINATOR; SMALL_STRING_MAX_LEN];
        let mut i = 0;
        while i < src.len() {
            bytes[i] = src[i];
            i += 1;
        }
        Self { bytes }
    }

    pub const fn len(&self) -> usize {
        let mut i = 0;
        while i < SMALL_STRING_MAX_LEN && self.bytes[i] != TERMINATOR {
            i += 1;
        }
        i
    }

    pub const fn is_empty(&self) -> bool {
        self.bytes[0] == TERMINATOR
    }

    pub fn as_str(&self) -> &str {
        let len = self.len();
        // SAFETY: bytes[..len] was copied verbatim from a validated `&str`
        // by every constructor, so it is well-formed UTF-8.
        unsafe { std::str::from_utf8_unchecked(&self.bytes[..len]) }
    }

    pub const fn as_bytes(&self) -> &[u8; SMALL_STRING_MAX_LEN] {
        &self.bytes
    }
}

impl PartialEq for SmallString {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Hash for SmallString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Debug for SmallString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for SmallString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl TryFrom<&str> for SmallString {
    type Error = ();

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::from_str(s).ok_or(())
    }
}

impl AsRef<str> for SmallString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_short_strings() {
        for s in ["", "a", "ab", "abcdefg", "héllo"] {
            if s.len() <= SMALL_STRING_MAX_LEN {
                let small = SmallString::from_str(s).unwrap();
                assert_eq!(small.as_str(), s);
                assert_eq!(small.len(), s.len());
            }
        }
    }

    #[test]
    fn rejects_oversized_strings() {
        assert!(SmallString::from_str("01234567890").is_none());
    }

    #[test]
    fn empty_is_empty() {
        let s = SmallString::from_str("").unwrap();
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn full_width_has_no_terminator_slack() {
        let s = SmallString::from_str("1234567").unwrap();
        assert_eq!(s.len(), 7);
        assert_eq!(s.as_str(), "1234567");
    }

    #[test]
    fn equality_and_hash_match_str_semantics() {
        use std::collections::HashSet;
        let a = SmallString::from_str("x").unwrap();
        let b = SmallString::from_str("x").unwrap();
        assert_eq!(a, b);
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }
}
