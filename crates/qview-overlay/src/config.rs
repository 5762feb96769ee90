//! Overlay configuration.
//!
//! Every field has a default, so a configuration file only needs to name the
//! settings it changes:
//!
//! ```json
//! { "tag_error_pos": true, "command": "/usr/local/bin/qview-command" }
//! ```
use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    buffer::DEFAULT_CAPACITY,
    error::{Error, Result},
};

/// Keys that run the external command directly from normal mode.
pub const DEFAULT_COMMAND_KEYS: &str = "`~\\|0123456789ADEFHJKLMnNOPQRSTUVWYZ";

/// Settings for the command overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Capacity of the edit buffer in bytes, including room for a terminator.
    pub buffer_capacity: usize,
    /// Move the cursor to the offending word when the command reports an
    /// unknown tag.
    pub tag_error_pos: bool,
    /// F2 to F10 run `:f2` to `:f10` through the external command.
    pub f_commands: bool,
    /// Return in normal mode runs `:enter` through the external command.
    pub enter_command: bool,
    /// Keys that run the external command with the key as argument.
    pub command_keys: String,
    /// Minimum distance of the overlay box from the left container edge.
    pub margin: i32,
    /// Line cap used when the font reports no line height.
    pub fallback_lines: usize,
    /// The external command program.
    pub command: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_CAPACITY,
            tag_error_pos: false,
            f_commands: false,
            enter_command: false,
            command_keys: DEFAULT_COMMAND_KEYS.to_string(),
            margin: 2,
            fallback_lines: 60,
            command: "qiv-command".to_string(),
        }
    }
}

impl Config {
    /// Parse a configuration from JSON.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&s)
    }

    /// Is `c` bound to run the external command?
    pub fn is_command_key(&self, c: char) -> bool {
        self.command_keys.contains(c)
    }

    /// Set the edit buffer capacity.
    pub fn with_buffer_capacity(mut self, cap: usize) -> Self {
        self.buffer_capacity = cap;
        self
    }

    /// Enable or disable tag error positioning.
    pub fn with_tag_error_pos(mut self, on: bool) -> Self {
        self.tag_error_pos = on;
        self
    }

    /// Enable or disable function key commands.
    pub fn with_f_commands(mut self, on: bool) -> Self {
        self.f_commands = on;
        self
    }

    /// Enable or disable the Return command.
    pub fn with_enter_command(mut self, on: bool) -> Self {
        self.enter_command = on;
        self
    }

    /// Set the command keys.
    pub fn with_command_keys(mut self, keys: impl Into<String>) -> Self {
        self.command_keys = keys.into();
        self
    }

    /// Set the external command program.
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }
}
