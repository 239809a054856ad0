//! Application state: the question catalog, key-term data and the
//! translator's mutable work (renderings and translations).
//!
//! The catalog and rules are fixed after startup. Renderings and translations
//! change through the API and sit behind async locks.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::config::{load_project_config_from_env, ProjectConfig};
use crate::key_terms::{KeyTermEntry, KeyTermRenderings, KeyTermRules};
use crate::sections::QuestionSections;
use crate::seeds::{seed_key_terms, seed_renderings, seed_rules, seed_sections};
use crate::translations::Translations;

#[derive(Clone)]
pub struct AppState {
    pub sections: Arc<QuestionSections>,
    pub rules: Arc<KeyTermRules>,
    pub key_terms: Arc<Vec<KeyTermEntry>>,
    pub renderings: Arc<RwLock<KeyTermRenderings>>,
    pub translations: Arc<RwLock<Translations>>,
}

impl AppState {
    /// Build state from env: load config if present, else fall back to seeds.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        Self::from_config(load_project_config_from_env())
    }

    #[instrument(level = "info", skip_all, fields(has_config = cfg.is_some()))]
    pub fn from_config(cfg: Option<ProjectConfig>) -> Self {
        let cfg = cfg.unwrap_or_else(|| {
            info!(target: "transcelerator", "No project config; using built-in seed data.");
            ProjectConfig {
                sections: seed_sections(),
                key_term_rules: seed_rules(),
                key_terms: seed_key_terms(),
                renderings: seed_renderings(),
                ..Default::default()
            }
        });

        let mut sections = QuestionSections::new(cfg.sections);
        let unapplied = sections.apply_customizations(&cfg.customizations);
        if !unapplied.is_empty() {
            warn!(target: "questions", count = unapplied.len(), "Some customizations could not be applied");
        }

        let translations = Translations::new(cfg.translations);
        info!(
            target: "transcelerator",
            sections = sections.sections().len(),
            questions = sections.len(),
            rules = cfg.key_term_rules.len(),
            key_terms = cfg.key_terms.len(),
            translations = translations.len(),
            "Startup inventory"
        );

        Self {
            sections: Arc::new(sections),
            rules: Arc::new(KeyTermRules::new(cfg.key_term_rules)),
            key_terms: Arc::new(cfg.key_terms),
            renderings: Arc::new(RwLock::new(KeyTermRenderings::new(cfg.renderings))),
            translations: Arc::new(RwLock::new(translations)),
        }
    }

    /// Key term by name, compared in normalized form.
    pub fn key_term(&self, term: &str) -> Option<&KeyTermEntry> {
        let wanted = crate::key_terms::normalize(term);
        self.key_terms
            .iter()
            .find(|t| crate::key_terms::normalize(&t.term) == wanted)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(None)
    }
}
