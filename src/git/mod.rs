// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! Stages files, reads the staged diff as text and records commits. The
//! classifier only ever sees the diff text.

pub mod commands;
pub mod diff;
mod repo;

pub use commands::{create_commit_in_repo, stage_files_in_repo};
pub use diff::staged_diff_text;
pub use repo::Repository;
