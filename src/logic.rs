//! Core behaviors behind the HTTP handlers.
//!
//! This includes:
//!   - Question lookups (range, identity match, display reference)
//!   - Translations of question text
//!   - Key-term rule evaluation, occurrences and renderings

use tracing::{debug, info, instrument};

use crate::key_terms::{is_excluded, is_reference_only, normalize, occurrences_in_range, terms_for_rendering_match, KeyTerm};
use crate::protocol::*;
use crate::question::QuestionRecord;
use crate::reference::{format_range, CANON_END, CANON_START};
use crate::state::AppState;
use crate::util::trunc_for_log;

#[instrument(level = "info", skip(state))]
pub async fn list_questions(state: &AppState, start: Option<i32>, end: Option<i32>) -> Vec<QuestionOut> {
  let start = start.unwrap_or(CANON_START);
  let end = end.unwrap_or(CANON_END);
  let translations = state.translations.read().await;
  let out: Vec<QuestionOut> = state
    .sections
    .questions_in_range(start, end)
    .into_iter()
    .map(|q| to_out(q, translations.translation_for(q)))
    .collect();
  debug!(target: "questions", start, end, count = out.len(), "Questions listed");
  out
}

/// Identity match of two keys as sent by a client.
#[instrument(level = "info", skip_all)]
pub fn match_keys(a: &QuestionRecord, b: &QuestionRecord) -> bool {
  a.to_key().matches(&b.to_key())
}

#[instrument(level = "info", skip(state, text), fields(%reference, text = %trunc_for_log(text, 60)))]
pub async fn find_question(state: &AppState, reference: &str, text: &str) -> Option<QuestionOut> {
  let q = state.sections.find_by_reference(reference, text)?;
  let translations = state.translations.read().await;
  Some(to_out(q, translations.translation_for(q)))
}

#[instrument(level = "info", skip(state, text), fields(%reference, text_len = text.len()))]
pub async fn get_translation(state: &AppState, reference: &str, text: &str) -> Option<String> {
  let translations = state.translations.read().await;
  translations.find(reference, text).map(|t| t.translation().to_string())
}

#[instrument(level = "info", skip(state, text, translation), fields(%reference, text_len = text.len()))]
pub async fn set_translation(state: &AppState, reference: &str, text: &str, translation: &str) -> Option<String> {
  let mut translations = state.translations.write().await;
  translations.set(reference, text, translation);
  info!(target: "questions", %reference, removed = translation.trim().is_empty(), "Translation stored");
  translations.find(reference, text).map(|t| t.translation().to_string())
}

#[instrument(level = "info", skip(state), fields(%term))]
pub fn rule_for_term(state: &AppState, term: &str) -> RuleOut {
  let rule = state.rules.find(term);
  debug!(target: "key_terms", %term, found = rule.is_some(), "Rule lookup");
  RuleOut {
    term: term.to_string(),
    normalized: normalize(term),
    rule: rule.and_then(|r| r.rule()).map(|t| t.as_str().to_string()),
    excluded: rule.is_some_and(is_excluded),
    reference_only: rule.is_some_and(is_reference_only),
  }
}

#[instrument(level = "info", skip(state), fields(%term))]
pub async fn rendering_for_term(state: &AppState, term: &str) -> RenderingOut {
  let renderings = state.renderings.read().await;
  let preferred = match state.key_term(term) {
    Some(kt) => renderings.preferred(kt),
    None => renderings
      .get(term)
      .map(|i| i.preferred_rendering.clone())
      .filter(|s| !s.is_empty()),
  };
  let additional = renderings.get(term).map(|i| i.additional_renderings.clone()).unwrap_or_default();
  RenderingOut { term: term.to_string(), preferred, additional }
}

#[instrument(level = "info", skip(state), fields(%term, %rendering, preferred))]
pub async fn add_rendering(state: &AppState, term: &str, rendering: &str, preferred: bool) -> RenderingOut {
  {
    let mut renderings = state.renderings.write().await;
    if preferred {
      renderings.set_preferred(term, rendering);
    } else {
      renderings.add_rendering(term, rendering);
    }
  }
  info!(target: "key_terms", %term, %rendering, preferred, "Rendering stored");
  rendering_for_term(state, term).await
}

#[instrument(level = "info", skip(state), fields(%term))]
pub fn term_occurrences(state: &AppState, term: &str, start: Option<i32>, end: Option<i32>) -> Vec<i32> {
  let start = start.unwrap_or(CANON_START);
  let end = end.unwrap_or(CANON_END);
  match state.key_term(term) {
    Some(kt) => occurrences_in_range(kt, &state.rules, start, end),
    None => {
      debug!(target: "key_terms", %term, "Unknown key term");
      Vec::new()
    }
  }
}

pub fn occurrence_labels(occurrences: &[i32]) -> Vec<String> {
  occurrences.iter().map(|&r| format_range(r, r)).collect()
}

#[instrument(level = "info", skip(state))]
pub fn suggestable_terms(state: &AppState) -> Vec<String> {
  terms_for_rendering_match(&state.key_terms, &state.rules)
    .into_iter()
    .map(|t| t.term().to_string())
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn seeded_questions_and_translation() {
    let state = AppState::default();
    let all = list_questions(&state, None, None).await;
    assert_eq!(all.len(), 5);
    let ranged = list_questions(&state, Some(40_005_003), Some(40_005_003)).await;
    // overview range, unranged overview, and the verse question
    assert_eq!(ranged.len(), 3);

    assert!(find_question(&state, "MAT 5.3", "Who did Jesus say are blessed?").await.is_some());
    assert_eq!(get_translation(&state, "MAT 5.3", "Who did Jesus say are blessed?").await, None);

    let stored = set_translation(&state, "MAT 5.3", "Who did Jesus say are blessed?", "¿A quiénes llamó Jesús dichosos?").await;
    assert!(stored.is_some());
    let q = find_question(&state, "MAT 5.3", "Who did Jesus say are blessed?").await.unwrap();
    assert_eq!(q.translation.as_deref(), Some("¿A quiénes llamó Jesús dichosos?"));
  }

  #[test]
  fn key_match_ignores_label() {
    let a = QuestionRecord {
      scripture_reference: Some("MAT 5.3".into()),
      start_ref: Some(40_005_003),
      end_ref: Some(40_005_003),
      text: Some("Who?".into()),
      ..Default::default()
    };
    let b = QuestionRecord { scripture_reference: Some("Matthew 5:3".into()), ..a.clone() };
    assert!(match_keys(&a, &b));
    let c = QuestionRecord { text: Some("Why?".into()), ..a.clone() };
    assert!(!match_keys(&a, &c));
  }

  #[test]
  fn seeded_rules() {
    let state = AppState::default();
    let moshe = rule_for_term(&state, "MOSHE");
    assert!(moshe.reference_only);
    assert!(!moshe.excluded);
    assert_eq!(moshe.rule.as_deref(), Some("MatchForRefOnly"));

    let blessed = rule_for_term(&state, "Blessed");
    assert!(blessed.excluded);
    assert!(term_occurrences(&state, "blessed", None, None).is_empty());

    let free = rule_for_term(&state, "Elijah");
    assert!(!free.excluded && !free.reference_only && free.rule.is_none());

    assert_eq!(term_occurrences(&state, "Moses", Some(40_017_001), Some(40_017_013)), vec![40_017_003, 40_017_004]);
    assert_eq!(suggestable_terms(&state), vec!["Elijah".to_string()]);
    assert_eq!(occurrence_labels(&[40_017_003]), vec!["MAT 17.3".to_string()]);
  }

  #[tokio::test]
  async fn renderings_flow() {
    let state = AppState::default();
    assert_eq!(rendering_for_term(&state, "Elijah").await.preferred.as_deref(), Some("Elias"));
    assert_eq!(rendering_for_term(&state, "Moses").await.preferred.as_deref(), Some("Moses"));

    let out = add_rendering(&state, "Elijah", "Elia", true).await;
    assert_eq!(out.preferred.as_deref(), Some("Elia"));
    assert_eq!(out.additional, vec!["Elias".to_string()]);
  }
}
