//! Section/option configuration store
//!
//! The bootstrap driver and every contrib step share one `Config`: a mapping
//! of section name to option name to string value. Steps read their inputs
//! from it (`[Main] prefix`, `[Main] build_jobs`) and publish derived paths
//! back into it for later consumers.
//!
//! ## Format
//!
//! ```toml
//! [Main]
//! prefix = "/opt/bempp"
//! build_jobs = "4"
//!
//! [Boost]
//! include_dir = "/opt/bempp/bempp/include"
//! ```
//!
//! Non-string scalars (`build_jobs = 4`) are accepted on load and kept as
//! their textual form. Floats keep a decimal point (`4.0` stays `"4.0"`), so
//! they never pass as integers.

use super::error::{BootstrapError, Result, io_err};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Scalar TOML value as it may appear in a config file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl From<RawValue> for String {
    fn from(value: RawValue) -> Self {
        match value {
            RawValue::Str(s) => s,
            RawValue::Int(i) => i.to_string(),
            RawValue::Float(f) => format!("{:?}", f),
            RawValue::Bool(b) => b.to_string(),
        }
    }
}

/// Configuration store shared by all bootstrap steps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl Config {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(io_err(format!("cannot read config {}", path.display())))?;
        Self::parse(&content, path)
    }

    /// Parse config text (used for in-memory configs and tests)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse(content, Path::new("<string>"))
    }

    fn parse(content: &str, origin: &Path) -> Result<Self> {
        let raw: BTreeMap<String, BTreeMap<String, RawValue>> =
            toml::from_str(content).map_err(|source| BootstrapError::ConfigParse {
                path: origin.to_path_buf(),
                source,
            })?;

        let sections = raw
            .into_iter()
            .map(|(name, options)| {
                let options: BTreeMap<String, String> = options
                    .into_iter()
                    .map(|(k, v)| (k, String::from(v)))
                    .collect();
                (name, options)
            })
            .collect();

        Ok(Self { sections })
    }

    /// Serialize the store as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(&self.sections)?)
    }

    /// Write the store to disk, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml_string()?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(io_err(format!("cannot create directory {}", parent.display())))?;
        }
        std::fs::write(path, content)
            .map_err(io_err(format!("cannot write config {}", path.display())))
    }

    /// Look up a required option
    pub fn get(&self, section: &str, key: &str) -> Result<&str> {
        self.get_opt(section, key)
            .ok_or_else(|| BootstrapError::MissingOption {
                section: section.to_string(),
                key: key.to_string(),
            })
    }

    /// Look up an optional option
    pub fn get_opt(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|options| options.get(key))
            .map(String::as_str)
    }

    /// Look up a required option and parse it as a positive integer
    pub fn get_int(&self, section: &str, key: &str) -> Result<u32> {
        let value = self.get(section, key)?;
        to_int(value).ok_or_else(|| BootstrapError::InvalidInteger {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    pub fn has_option(&self, section: &str, key: &str) -> bool {
        self.get_opt(section, key).is_some()
    }

    /// Set an option unconditionally, creating the section if needed
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
    }

    /// Set an option only if it is absent, or always when `overwrite` is set.
    ///
    /// Returns whether the value was written.
    pub fn set_default_option(
        &mut self,
        section: &str,
        key: &str,
        value: impl Into<String>,
        overwrite: bool,
    ) -> bool {
        if !overwrite && self.has_option(section, key) {
            return false;
        }
        self.set(section, key, value);
        true
    }

    /// Remove an option, returning its previous value
    pub fn remove_option(&mut self, section: &str, key: &str) -> Option<String> {
        let options = self.sections.get_mut(section)?;
        let removed = options.remove(key);
        if options.is_empty() {
            self.sections.remove(section);
        }
        removed
    }

    /// Section names in sorted order
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}

/// Parse a positive integer, ignoring surrounding whitespace.
pub fn to_int(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|n| *n > 0)
}
