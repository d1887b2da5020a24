//! Timestamp plugin options and their resolution.
//!
//! # Invariants
//! - Resolution always yields all four settings; unset options take defaults.
//! - Values are merged, never validated. An empty field name is accepted.

use serde::{Deserialize, Serialize};

/// Default name of the field holding the first-persist instant.
pub const DEFAULT_CREATED_NAME: &str = "createdAt";
/// Default name of the field holding the latest-persist instant.
pub const DEFAULT_UPDATED_NAME: &str = "updatedAt";

/// Caller-supplied, possibly partial, plugin options.
///
/// JSON keys use the external option names: `createdName`, `updatedName`,
/// `disableCreated`, `disableUpdated`. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_created: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_updated: Option<bool>,
}

impl TimestampOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from JSON. A literal `null` yields empty options.
    ///
    /// # Errors
    /// - Returns the `serde_json` error for malformed input or mistyped values.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let options: Option<Self> = serde_json::from_str(json)?;
        Ok(options.unwrap_or_default())
    }

    pub fn created_name(mut self, name: impl Into<String>) -> Self {
        self.created_name = Some(name.into());
        self
    }

    pub fn updated_name(mut self, name: impl Into<String>) -> Self {
        self.updated_name = Some(name.into());
        self
    }

    pub fn disable_created(mut self, disabled: bool) -> Self {
        self.disable_created = Some(disabled);
        self
    }

    pub fn disable_updated(mut self, disabled: bool) -> Self {
        self.disable_updated = Some(disabled);
        self
    }
}

/// Fully resolved plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampConfig {
    created_name: String,
    updated_name: String,
    created_disabled: bool,
    updated_disabled: bool,
}

impl TimestampConfig {
    /// Merges `options` over the defaults. Absent options resolve the same
    /// as empty ones.
    pub fn resolve(options: Option<&TimestampOptions>) -> Self {
        let empty = TimestampOptions::default();
        let options = options.unwrap_or(&empty);
        Self {
            created_name: options
                .created_name
                .clone()
                .unwrap_or_else(|| DEFAULT_CREATED_NAME.to_string()),
            updated_name: options
                .updated_name
                .clone()
                .unwrap_or_else(|| DEFAULT_UPDATED_NAME.to_string()),
            created_disabled: options.disable_created.unwrap_or(false),
            updated_disabled: options.disable_updated.unwrap_or(false),
        }
    }

    pub fn created_name(&self) -> &str {
        &self.created_name
    }

    pub fn updated_name(&self) -> &str {
        &self.updated_name
    }

    pub fn created_enabled(&self) -> bool {
        !self.created_disabled
    }

    pub fn updated_enabled(&self) -> bool {
        !self.updated_disabled
    }
}

impl Default for TimestampConfig {
    fn default() -> Self {
        Self::resolve(None)
    }
}
