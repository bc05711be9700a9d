//! # Theme Persistence
//!
//! Key-value storage for the theme preference: an INI state file in
//! production, a shared in-memory cell in tests.

use crate::repl::models::ThemeState;
use anyhow::{Context, Result};
use ini::Ini;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Storage key of the theme preference
pub const THEME_KEY: &str = "ledger_theme";

/// INI section holding client UI state
const UI_SECTION: &str = "ui";

pub trait ThemeStore: Send {
    /// Stored raw value, `None` when nothing was saved
    fn load(&self) -> Result<Option<String>>;

    fn save(&mut self, theme: ThemeState) -> Result<()>;
}

/// Theme preference kept in an INI file
#[derive(Debug, Clone)]
pub struct IniThemeStore {
    path: PathBuf,
}

impl IniThemeStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Ini> {
        if !self.path.exists() {
            return Ok(Ini::new());
        }
        Ini::load_from_file(&self.path)
            .with_context(|| format!("failed to read state file {}", self.path.display()))
    }
}

impl ThemeStore for IniThemeStore {
    fn load(&self) -> Result<Option<String>> {
        let ini = self.read()?;
        Ok(ini
            .section(Some(UI_SECTION))
            .and_then(|section| section.get(THEME_KEY))
            .map(str::to_string))
    }

    fn save(&mut self, theme: ThemeState) -> Result<()> {
        // Keep whatever else lives in the state file
        let mut ini = self.read()?;
        ini.with_section(Some(UI_SECTION)).set(THEME_KEY, theme.as_str());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        ini.write_to_file(&self.path)
            .with_context(|| format!("failed to write state file {}", self.path.display()))
    }
}

/// In-memory store; clones share the same cell so a reload can be simulated
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeStore {
    value: Arc<Mutex<Option<String>>>,
}

impl MemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: &str) -> Self {
        Self {
            value: Arc::new(Mutex::new(Some(value.to_string()))),
        }
    }

    pub fn value(&self) -> Option<String> {
        self.value.lock().ok().and_then(|v| v.clone())
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.value())
    }

    fn save(&mut self, theme: ThemeState) -> Result<()> {
        let mut value = self
            .value
            .lock()
            .map_err(|_| anyhow::anyhow!("theme store lock poisoned"))?;
        *value = Some(theme.as_str().to_string());
        Ok(())
    }
}
