// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Result types for cache reads.

/// Result of a non-fetching cache read.
///
/// Distinguishes "we cached an absence" from "we never asked", which a bare
/// `Option` cannot express.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup<T> {
    /// A value is cached for this key.
    Hit(T),
    /// The store was queried for this key and had nothing.
    Absent,
    /// No lookup for this key has gone through the cache yet.
    Unqueried,
}

impl<T> CacheLookup<T> {
    /// The cached value, if this is a hit.
    pub fn value(self) -> Option<T> {
        match self {
            CacheLookup::Hit(value) => Some(value),
            CacheLookup::Absent | CacheLookup::Unqueried => None,
        }
    }
}

/// A read-through result, flagged with whether the cache served it.
///
/// `value` is `None` when the store confirmed the key has no value; the
/// confirmed absence itself may still have come from the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched<T> {
    pub value: Option<T>,
    pub from_cache: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_value_extracts_only_hits() {
        assert_eq!(CacheLookup::Hit(7).value(), Some(7));
        assert_eq!(CacheLookup::<i32>::Absent.value(), None);
        assert_eq!(CacheLookup::<i32>::Unqueried.value(), None);
    }
}
