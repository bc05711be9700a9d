//! Configuration constants and utilities for ledgerline
//!
//! Connection profiles live in an INI file, one section per profile:
//!
//! ```ini
//! [default]
//! server = http://localhost:8080
//!
//! [staging]
//! server = https://ledger.staging.example
//! proxy = http://proxy.internal:3128
//! insecure = true
//! ```
//!
//! Client state (the theme preference) lives in a separate INI file.

use anyhow::{Context, Result};
use ini::Ini;
use std::path::{Path, PathBuf};

/// Default profile file path for ledgerline
pub const DEFAULT_PROFILE_PATH: &str = "~/.ledgerline/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "LEDGERLINE_PROFILE_PATH";

/// Default path of the persisted client state
pub const DEFAULT_STATE_PATH: &str = "~/.ledgerline/state";

/// Environment variable name for overriding the state path
pub const STATE_PATH_ENV_VAR: &str = "LEDGERLINE_STATE_PATH";

/// Environment variable holding the tracing filter
pub const LOG_FILTER_ENV_VAR: &str = "LEDGERLINE_LOG";

/// Server used when no profile is configured
pub const DEFAULT_SERVER: &str = "http://localhost:8080";

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Get the state file path, checking environment variable first, then falling back to default
pub fn get_state_path() -> String {
    std::env::var_os(STATE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_STATE_PATH.to_string())
}

/// Expand `~` and environment variables in a configured path
pub fn expand_path(path: &str) -> PathBuf {
    match shellexpand::full(path) {
        Ok(expanded) => PathBuf::from(expanded.into_owned()),
        Err(e) => {
            tracing::warn!("Could not expand path '{}': {}", path, e);
            PathBuf::from(path)
        }
    }
}

/// Where and how to reach the ledger API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionProfile {
    server: String,
    proxy: Option<String>,
    insecure: bool,
}

impl ConnectionProfile {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            proxy: None,
            insecure: false,
        }
    }

    /// Profile used when nothing is configured
    pub fn blank() -> Self {
        Self::new(DEFAULT_SERVER)
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    pub fn insecure(&self) -> bool {
        self.insecure
    }

    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }
}

/// Profiles stored as sections of an INI file
#[derive(Debug, Clone)]
pub struct IniProfileStore {
    path: PathBuf,
}

impl IniProfileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read one profile; `Ok(None)` when the file or the section is absent
    pub fn get_profile(&self, name: &str) -> Result<Option<ConnectionProfile>> {
        if !self.path.exists() {
            tracing::debug!("Profile file {} does not exist", self.path.display());
            return Ok(None);
        }

        let ini = Ini::load_from_file(&self.path)
            .with_context(|| format!("failed to read profile file {}", self.path.display()))?;

        let Some(section) = ini.section(Some(name)) else {
            return Ok(None);
        };

        let server = section
            .get("server")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SERVER);
        let insecure = match section.get("insecure").map(|v| v.trim().to_ascii_lowercase()) {
            None => false,
            Some(v) if v == "true" || v == "yes" || v == "1" => true,
            Some(v) if v == "false" || v == "no" || v == "0" || v.is_empty() => false,
            Some(v) => anyhow::bail!("profile '{name}': invalid insecure value '{v}'"),
        };

        Ok(Some(ConnectionProfile {
            server: server.to_string(),
            proxy: section
                .get("proxy")
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            insecure,
        }))
    }
}

/// Load a profile by name, falling back to the blank profile when absent
pub fn load_profile(name: &str, path: &str) -> Result<ConnectionProfile> {
    tracing::debug!("Loading profile '{}' from '{}'", name, path);

    match IniProfileStore::new(expand_path(path)).get_profile(name)? {
        Some(profile) => {
            tracing::debug!("Profile loaded successfully, server: {}", profile.server());
            Ok(profile)
        }
        None => {
            tracing::debug!("Profile '{}' not found, using blank profile", name);
            Ok(ConnectionProfile::blank())
        }
    }
}
