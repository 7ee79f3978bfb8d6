use anyhow::{Context, Result};
use netprofit_core::{
    CostItemLists, DEFAULT_FIXED_COST_ITEMS, DEFAULT_OTHER_EXPENSE_ITEMS, DEFAULT_VARIABLE_COST_ITEMS,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_netprofit_home, netprofit_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cost_items: CostItemsSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Expense item names per cost bucket. Names are compared with all whitespace removed.
/// A list left out of the file keeps its built-in default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CostItemsSection {
    pub fixed: Vec<String>,
    pub variable: Vec<String>,
    /// Informational; unlisted items are "other" regardless
    pub other: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// tracing filter directive, e.g. "warn" or "netprofit_finance=debug"
    pub level: String,
}

impl Default for CostItemsSection {
    fn default() -> Self {
        fn owned(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }
        Self {
            fixed: owned(&DEFAULT_FIXED_COST_ITEMS),
            variable: owned(&DEFAULT_VARIABLE_COST_ITEMS),
            other: owned(&DEFAULT_OTHER_EXPENSE_ITEMS),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl CostItemsSection {
    /// Freeze the configured names into the lookup sets used by the classifier.
    pub fn to_lists(&self) -> CostItemLists {
        CostItemLists::new(&self.fixed, &self.variable)
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(netprofit_home()?.join("config.toml"))
}

/// Load the config at `path` (or the default location). A missing file means defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Write the default config unless one already exists.
pub fn init_config(path: Option<&Path>) -> Result<()> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => ensure_netprofit_home()?.join("config.toml"),
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
