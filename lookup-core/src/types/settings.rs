//! Builder settings
//!
//! A snapshot of the inclusion flags read once per build pass. Settings can
//! be written in TOML (`lookup.toml`), keys in camelCase:
//!
//! ```toml
//! includeFields = true
//! includeUnsupported = true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Individual builder flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderFlag {
    IncludeEvents,
    IncludeUnsupported,
    IncludePrivate,
    IncludeStatic,
    IncludeFields,
    IncludeExtensions,
    IncludeTiming,
}

/// Flags gating member categories and diagnostics for one build pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderSettings {
    /// Show events
    #[serde(default)]
    pub include_events: bool,

    /// Show void and parameterized members as unsupported markers
    #[serde(default)]
    pub include_unsupported: bool,

    /// Show non-public members
    #[serde(default)]
    pub include_private: bool,

    /// Show static members of instance types
    #[serde(default)]
    pub include_static: bool,

    /// Show fields
    #[serde(default)]
    pub include_fields: bool,

    /// Run registered extensions
    #[serde(default)]
    pub include_extensions: bool,

    /// Measure how long each member takes to evaluate
    #[serde(default)]
    pub include_timing: bool,
}

/// Errors loading settings from disk
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse settings file: {0}")]
    ParseError(#[from] toml::de::Error),
}

impl BuilderSettings {
    /// Every flag enabled
    pub fn all() -> Self {
        Self {
            include_events: true,
            include_unsupported: true,
            include_private: true,
            include_static: true,
            include_fields: true,
            include_extensions: true,
            include_timing: true,
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn with(mut self, flag: BuilderFlag) -> Self {
        self.set(flag, true);
        self
    }

    pub fn set(&mut self, flag: BuilderFlag, enabled: bool) {
        *self.flag_mut(flag) = enabled;
    }

    pub fn is_enabled(&self, flag: BuilderFlag) -> bool {
        match flag {
            BuilderFlag::IncludeEvents => self.include_events,
            BuilderFlag::IncludeUnsupported => self.include_unsupported,
            BuilderFlag::IncludePrivate => self.include_private,
            BuilderFlag::IncludeStatic => self.include_static,
            BuilderFlag::IncludeFields => self.include_fields,
            BuilderFlag::IncludeExtensions => self.include_extensions,
            BuilderFlag::IncludeTiming => self.include_timing,
        }
    }

    fn flag_mut(&mut self, flag: BuilderFlag) -> &mut bool {
        match flag {
            BuilderFlag::IncludeEvents => &mut self.include_events,
            BuilderFlag::IncludeUnsupported => &mut self.include_unsupported,
            BuilderFlag::IncludePrivate => &mut self.include_private,
            BuilderFlag::IncludeStatic => &mut self.include_static,
            BuilderFlag::IncludeFields => &mut self.include_fields,
            BuilderFlag::IncludeExtensions => &mut self.include_extensions,
            BuilderFlag::IncludeTiming => &mut self.include_timing,
        }
    }
}
