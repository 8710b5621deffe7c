// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions for the Inkstone notification core.
//!
//! Persistent storage and channel transports live outside this workspace;
//! these traits are the seams production backends and the in-memory test
//! doubles implement. All traits use `#[async_trait]` for dynamic dispatch
//! compatibility.

pub mod content;
pub mod history;
pub mod member;
pub mod sender;

// Re-export all traits at the traits module level for convenience.
pub use content::ContentStore;
pub use history::SendHistory;
pub use member::MemberStore;
pub use sender::PromptSender;
