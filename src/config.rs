//! Loading project data (question catalog, key-term rules, renderings,
//! customizations and translations) from TOML.
//!
//! See `ProjectConfig` for the expected schema. Every list is optional.

use std::path::Path;

use serde::Deserialize;
use tracing::{error, info};

use crate::error::LoadError;
use crate::key_terms::{KeyTermEntry, KeyTermRenderingInfo, KeyTermRule};
use crate::sections::{PhraseCustomization, Section};
use crate::translations::XmlTranslation;

/// Env variable naming the project TOML file.
pub const CONFIG_PATH_ENV: &str = "TRANSCELERATOR_CONFIG_PATH";

#[derive(Clone, Debug, Deserialize, Default)]
pub struct ProjectConfig {
  #[serde(default)]
  pub sections: Vec<Section>,
  #[serde(default)]
  pub key_term_rules: Vec<KeyTermRule>,
  #[serde(default)]
  pub key_terms: Vec<KeyTermEntry>,
  #[serde(default)]
  pub renderings: Vec<KeyTermRenderingInfo>,
  #[serde(default)]
  pub customizations: Vec<PhraseCustomization>,
  #[serde(default)]
  pub translations: Vec<XmlTranslation>,
}

pub fn parse_project_config(s: &str, path: &str) -> Result<ProjectConfig, LoadError> {
  toml::from_str(s).map_err(|source| LoadError::Parse { path: path.to_string(), source })
}

pub fn load_project_config(path: &Path) -> Result<ProjectConfig, LoadError> {
  let shown = path.display().to_string();
  let s = std::fs::read_to_string(path).map_err(|source| LoadError::Io { path: shown.clone(), source })?;
  parse_project_config(&s, &shown)
}

/// Attempt to load `ProjectConfig` from TRANSCELERATOR_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_project_config_from_env() -> Option<ProjectConfig> {
  let path = std::env::var(CONFIG_PATH_ENV).ok()?;
  match load_project_config(Path::new(&path)) {
    Ok(cfg) => {
      info!(
        target: "transcelerator",
        %path,
        sections = cfg.sections.len(),
        rules = cfg.key_term_rules.len(),
        key_terms = cfg.key_terms.len(),
        "Loaded project config (TOML)"
      );
      Some(cfg)
    }
    Err(e) => {
      error!(target: "transcelerator", %path, error = %e, "Failed to load project config");
      None
    }
  }
}
