// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for cmg.
//!
//! This module handles loading, parsing, merging and saving configuration.
//! Configuration is always passed explicitly; there is no global instance.

mod loader;
mod schema;

pub use loader::{
    find_config_file, find_config_file_from, load_config, load_config_from, merge_configs,
    parse_config, save_config_to, user_config_path,
};
pub use schema::*;
