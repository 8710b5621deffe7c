// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-local TTL cache for the Inkstone notification pipeline.
//!
//! During each 15-minute trigger window the dispatcher resolves the same
//! content and member lookups over and over; [`PromptCache`] absorbs that
//! read load in front of the stores. Entries distinguish a cached value from
//! a cached confirmed absence, and the whole cache drops its contents once
//! its max age elapses.
//!
//! The cache is shared within a single process only. It is never consulted
//! for send-history dedup decisions.

pub mod cache;
pub mod lookup;

pub use cache::PromptCache;
pub use lookup::{CacheLookup, Fetched};
