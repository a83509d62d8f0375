// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message assembly and the interactive confirmation flow.

mod confirm;
mod message;

pub use confirm::{confirm_message, Confirmation};
pub use message::Classification;
