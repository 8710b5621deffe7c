// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Editorial publishing for scheduled prompts.
//!
//! A submitted prompt either goes live or goes back to the editors; this
//! crate holds the state machine that decides which, validates the item,
//! and persists the transition with an audit identity.

pub mod publisher;

pub use publisher::{ContentPublisher, PublishReport};
