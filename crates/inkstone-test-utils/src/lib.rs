// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Inkstone unit and integration tests.
//!
//! Provides in-memory collaborator implementations and fixtures for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`InMemoryContentStore`] / [`InMemoryMemberStore`] - store doubles with
//!   lookup counters and injectable failures
//! - [`InMemorySendHistory`] - append-only history with the atomic
//!   conditional-insert contract
//! - [`MockSender`] - channel sender with capture and failure injection

pub mod fixtures;
pub mod memory_history;
pub mod memory_store;
pub mod mock_sender;

pub use memory_history::InMemorySendHistory;
pub use memory_store::{InMemoryContentStore, InMemoryMemberStore, StatusUpdate};
pub use mock_sender::MockSender;
