//! Configuration management for Subrefine.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::aggregator::DEFAULT_TAIL_SIZE;

/// Schemes accepted when `allowed_schemes` is absent or empty.
pub const DEFAULT_SCHEMES: &[&str] = &["vless", "vmess", "ss"];

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URI schemes to keep (case-insensitive; defaults to vless, vmess, ss)
    pub allowed_schemes: Vec<String>,

    /// Lite (recent tail) output settings
    pub lite: LiteConfig,

    /// Subscription sources, processed in order
    pub subscriptions: Vec<Subscription>,
}

/// Settings for the bounded "lite" output
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct LiteConfig {
    /// How many trailing entries the lite list keeps (0 means the default)
    pub n: usize,
}

impl Default for LiteConfig {
    fn default() -> Self {
        Self { n: DEFAULT_TAIL_SIZE }
    }
}

/// One remote subscription feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    /// Unique name, used (sanitized) as the output directory
    pub key: String,
    /// Feed URL
    pub url: String,
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        for sub in &self.subscriptions {
            if sub.url.trim().is_empty() {
                anyhow::bail!("Subscription '{}' has an empty URL", sub.key);
            }
            if !sub.url.starts_with("https://") && !sub.url.starts_with("http://") {
                anyhow::bail!(
                    "Subscription '{}' URL must be HTTP(S): {}",
                    sub.key,
                    sub.url
                );
            }
        }
        Ok(())
    }

    /// Build the immutable allowed-scheme set for this run
    pub fn scheme_set(&self) -> SchemeSet {
        SchemeSet::from_config(&self.allowed_schemes)
    }
}

/// Immutable set of lowercase allowed URI schemes.
///
/// Built once per run from configuration and passed by reference into the
/// decoder and filter stages.
#[derive(Debug, Clone)]
pub struct SchemeSet(HashSet<String>);

impl SchemeSet {
    /// Build from configured scheme names; entries are trimmed and
    /// lowercased, and an empty result falls back to [`DEFAULT_SCHEMES`].
    pub fn from_config(schemes: &[String]) -> Self {
        let set: HashSet<String> = schemes
            .iter()
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        if set.is_empty() {
            Self::default()
        } else {
            Self(set)
        }
    }

    /// Whether an entry's scheme (the text before its first `://`,
    /// compared case-insensitively) is allowed. Entries without `://`
    /// never match.
    pub fn matches(&self, entry: &str) -> bool {
        match entry.find("://") {
            Some(idx) => self.0.contains(&entry[..idx].to_ascii_lowercase()),
            None => false,
        }
    }

    /// Case-insensitive search for any `<scheme>://` marker in a decoded
    /// payload. Used by the decoder to tell a real URI list from plain
    /// text that merely looked like base64.
    pub fn any_marker_in(&self, payload: &[u8]) -> bool {
        let lower: Vec<u8> = payload.iter().map(|b| b.to_ascii_lowercase()).collect();
        self.0.iter().any(|scheme| {
            let marker = format!("{scheme}://").into_bytes();
            lower
                .windows(marker.len())
                .any(|window| window == marker.as_slice())
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for SchemeSet {
    fn default() -> Self {
        Self(DEFAULT_SCHEMES.iter().map(|s| s.to_string()).collect())
    }
}
