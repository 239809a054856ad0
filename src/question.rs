//! Checking questions and the identity rules used to match them.
//!
//! A question is identified by its Scripture range plus its text. Text is kept
//! in NFC (composed) form with case preserved; compare with `normalize_text`
//! applied to any raw input. Key-term ids use a different policy, see
//! `key_terms::normalize`.

use serde::{Deserialize, Serialize};
use tracing::warn;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::reference::{format_range, CANON_END, CANON_START};

/// Prefix of the text generated for questions authored without any text.
pub const PLACEHOLDER_PREFIX: &str = "GUID: ";

/// NFC form of a question text. Case and diacritics are preserved.
pub fn normalize_text(text: &str) -> String {
  text.nfc().collect()
}

/// Unique stand-in text for a question that has none.
pub fn placeholder_text() -> String {
  format!("{}{}", PLACEHOLDER_PREFIX, Uuid::new_v4())
}

/// Key tied to a specific passage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangedKey {
  scripture_reference: String,
  start_ref: i32,
  end_ref: i32,
  text: String,
}

/// Key for a question that applies to the whole canon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnrangedKey {
  text: String,
}

/// Identity of a checking question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuestionKey {
  Ranged(RangedKey),
  Unranged(UnrangedKey),
}

impl QuestionKey {
  /// Ranged key. An empty `scripture_reference` is derived from the range.
  pub fn ranged(scripture_reference: impl Into<String>, start_ref: i32, end_ref: i32, text: &str) -> Self {
    let mut scripture_reference = scripture_reference.into();
    if scripture_reference.is_empty() {
      scripture_reference = format_range(start_ref, end_ref);
    }
    QuestionKey::Ranged(RangedKey {
      scripture_reference,
      start_ref,
      end_ref,
      text: normalize_text(text),
    })
  }

  pub fn unranged(text: &str) -> Self {
    QuestionKey::Unranged(UnrangedKey { text: normalize_text(text) })
  }

  pub fn scripture_reference(&self) -> &str {
    match self {
      QuestionKey::Ranged(k) => &k.scripture_reference,
      QuestionKey::Unranged(_) => "",
    }
  }

  pub fn start_ref(&self) -> i32 {
    match self {
      QuestionKey::Ranged(k) => k.start_ref,
      QuestionKey::Unranged(_) => CANON_START,
    }
  }

  pub fn end_ref(&self) -> i32 {
    match self {
      QuestionKey::Ranged(k) => k.end_ref,
      QuestionKey::Unranged(_) => CANON_END,
    }
  }

  pub fn text(&self) -> &str {
    match self {
      QuestionKey::Ranged(k) => &k.text,
      QuestionKey::Unranged(k) => &k.text,
    }
  }

  /// Same key range with different text.
  pub fn with_text(&self, text: &str) -> Self {
    match self {
      QuestionKey::Ranged(k) => QuestionKey::Ranged(RangedKey { text: normalize_text(text), ..k.clone() }),
      QuestionKey::Unranged(_) => QuestionKey::unranged(text),
    }
  }

  /// Same question: equal numeric range and equal text. The display label is ignored.
  pub fn matches(&self, other: &QuestionKey) -> bool {
    self.start_ref() == other.start_ref() && self.end_ref() == other.end_ref() && self.text() == other.text()
  }

  /// Same question by display label and text. Both compared ordinally; the
  /// caller supplies `text` already in NFC form.
  pub fn matches_reference(&self, reference: &str, text: &str) -> bool {
    self.scripture_reference() == reference && self.text() == text
  }
}

/// Serialized shape of a question (config files, API payloads).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct QuestionRecord {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub scripture_reference: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub start_ref: Option<i32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub end_ref: Option<i32>,
  #[serde(default)]
  pub text: Option<String>,
  #[serde(default)]
  pub answers: Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub notes: Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub alternate_forms: Vec<String>,
}

impl QuestionRecord {
  /// Key described by this record. A record without a numeric range is
  /// unranged; a range missing one end is a single reference.
  pub fn to_key(&self) -> QuestionKey {
    let text = self.text.as_deref().unwrap_or_default();
    let (start, end) = match (self.start_ref, self.end_ref) {
      (Some(start), end) => (start, end.unwrap_or(start)),
      (None, Some(end)) => {
        warn!(target: "questions", end_ref = end, "Question has end_ref without start_ref; using it for both");
        (end, end)
      }
      (None, None) => return QuestionKey::unranged(text),
    };
    QuestionKey::ranged(self.scripture_reference.clone().unwrap_or_default(), start, end, text)
  }
}

/// A checking question with its expected answers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "QuestionRecord", into = "QuestionRecord")]
pub struct Question {
  key: QuestionKey,
  pub answers: Vec<String>,
  pub notes: Vec<String>,
  pub alternate_forms: Vec<String>,
}

impl Question {
  /// Builds a question on `key`. Empty text is replaced by a generated placeholder.
  pub fn new(key: QuestionKey) -> Self {
    let key = if key.text().is_empty() { key.with_text(&placeholder_text()) } else { key };
    Self { key, answers: Vec::new(), notes: Vec::new(), alternate_forms: Vec::new() }
  }

  pub fn ranged(scripture_reference: impl Into<String>, start_ref: i32, end_ref: i32, text: &str) -> Self {
    Self::new(QuestionKey::ranged(scripture_reference, start_ref, end_ref, text))
  }

  pub fn unranged(text: &str) -> Self {
    Self::new(QuestionKey::unranged(text))
  }

  pub fn with_answers(mut self, answers: Vec<String>) -> Self {
    self.answers = answers;
    self
  }

  pub fn with_notes(mut self, notes: Vec<String>) -> Self {
    self.notes = notes;
    self
  }

  pub fn with_alternate_forms(mut self, forms: Vec<String>) -> Self {
    self.alternate_forms = forms;
    self
  }

  pub fn key(&self) -> &QuestionKey {
    &self.key
  }

  pub fn text(&self) -> &str {
    self.key.text()
  }

  pub fn is_placeholder(&self) -> bool {
    self.key.text().starts_with(PLACEHOLDER_PREFIX)
  }

  /// Replaces the text, keeping the range. The previous text is kept as an
  /// alternate form.
  pub fn retext(&mut self, text: &str) {
    let previous = self.key.text().to_string();
    let key = self.key.with_text(text);
    self.key = if key.text().is_empty() { key.with_text(&placeholder_text()) } else { key };
    if previous != self.key.text() && !self.alternate_forms.contains(&previous) {
      self.alternate_forms.push(previous);
    }
  }
}

impl From<QuestionRecord> for Question {
  fn from(r: QuestionRecord) -> Self {
    let key = r.to_key();
    Question::new(key)
      .with_answers(r.answers)
      .with_notes(r.notes)
      .with_alternate_forms(r.alternate_forms)
  }
}

impl From<Question> for QuestionRecord {
  fn from(q: Question) -> Self {
    let ranged = matches!(q.key, QuestionKey::Ranged(_));
    QuestionRecord {
      scripture_reference: ranged.then(|| q.key.scripture_reference().to_string()),
      start_ref: ranged.then(|| q.key.start_ref()),
      end_ref: ranged.then(|| q.key.end_ref()),
      text: Some(q.key.text().to_string()),
      answers: q.answers,
      notes: q.notes,
      alternate_forms: q.alternate_forms,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const DECOMPOSED: &str = "Jose\u{0301}";
  const COMPOSED: &str = "Jos\u{00E9}";

  #[test]
  fn matches_ignores_reference_label() {
    let a = QuestionKey::ranged("MAT 5.3", 40_005_003, 40_005_003, "Who is blessed?");
    let b = QuestionKey::ranged("Matthew 5:3", 40_005_003, 40_005_003, "Who is blessed?");
    assert!(a.matches(&b));
    assert!(b.matches(&a));
  }

  #[test]
  fn matches_requires_equal_text_and_range() {
    let a = QuestionKey::ranged("MAT 5.3", 40_005_003, 40_005_003, "Who is blessed?");
    assert!(!a.matches(&QuestionKey::ranged("MAT 5.3", 40_005_003, 40_005_003, "Who is poor?")));
    assert!(!a.matches(&QuestionKey::ranged("MAT 5.3", 40_005_003, 40_005_004, "Who is blessed?")));
  }

  #[test]
  fn text_is_stored_composed() {
    let a = QuestionKey::ranged("", 40_001_018, 40_001_018, DECOMPOSED);
    let b = QuestionKey::ranged("", 40_001_018, 40_001_018, COMPOSED);
    assert_eq!(a.text(), COMPOSED);
    assert!(a.matches(&b));
  }

  #[test]
  fn matches_reference_uses_label_not_range() {
    let key = QuestionKey::ranged("MAT 5.3-12", 40_005_003, 40_005_012, "What does Jesus teach?");
    assert!(key.matches_reference("MAT 5.3-12", "What does Jesus teach?"));
    assert!(!key.matches_reference("mat 5.3-12", "What does Jesus teach?"));
    assert!(!key.matches_reference("MAT 5.3", "What does Jesus teach?"));
  }

  #[test]
  fn matches_reference_is_ordinal_on_text() {
    let key = QuestionKey::ranged("MAT 1.18", 40_001_018, 40_001_018, COMPOSED);
    assert!(!key.matches_reference("MAT 1.18", DECOMPOSED));
    assert!(key.matches_reference("MAT 1.18", &normalize_text(DECOMPOSED)));
  }

  #[test]
  fn unranged_key_spans_canon() {
    let key = QuestionKey::unranged("What is the main idea?");
    assert_eq!(key.scripture_reference(), "");
    assert_eq!(key.start_ref(), CANON_START);
    assert_eq!(key.end_ref(), CANON_END);
    let same = QuestionKey::ranged("Whole Bible", CANON_START, CANON_END, "What is the main idea?");
    assert!(key.matches(&same));
  }

  #[test]
  fn empty_label_is_derived_from_range() {
    let key = QuestionKey::ranged("", 40_005_003, 40_005_012, "q");
    assert_eq!(key.scripture_reference(), "MAT 5.3-12");
  }

  #[test]
  fn empty_text_gets_unique_placeholder() {
    let a = Question::ranged("MAT 5.3", 40_005_003, 40_005_003, "");
    let b = Question::ranged("MAT 5.3", 40_005_003, 40_005_003, "");
    assert!(a.text().starts_with(PLACEHOLDER_PREFIX));
    assert!(a.text().len() > PLACEHOLDER_PREFIX.len());
    assert!(a.is_placeholder());
    assert_ne!(a.text(), b.text());
  }

  #[test]
  fn deserialization_goes_through_constructor() {
    let q: Question = serde_json::from_str(r#"{"start_ref": 40005003, "text": "José?"}"#).unwrap();
    assert_eq!(q.text(), "Jos\u{00E9}?");
    assert_eq!(q.key().end_ref(), 40_005_003);
    assert_eq!(q.key().scripture_reference(), "MAT 5.3");

    let empty: Question = serde_json::from_str(r#"{"answers": ["a"]}"#).unwrap();
    assert!(empty.is_placeholder());
    assert_eq!(empty.key().start_ref(), CANON_START);
    assert_eq!(empty.answers, vec!["a".to_string()]);
  }

  #[test]
  fn record_with_only_end_ref_stays_ranged() {
    let rec = QuestionRecord { end_ref: Some(40_005_004), text: Some("Who mourns?".into()), ..Default::default() };
    let key = rec.to_key();
    assert_eq!(key.start_ref(), 40_005_004);
    assert_eq!(key.end_ref(), 40_005_004);
    assert_eq!(key.scripture_reference(), "MAT 5.4");
  }

  #[test]
  fn record_keeps_variant() {
    let q = Question::unranged("Why?");
    let rec = QuestionRecord::from(q.clone());
    assert!(rec.start_ref.is_none());
    assert_eq!(Question::from(rec), q);
  }

  #[test]
  fn retext_keeps_previous_as_alternate() {
    let mut q = Question::ranged("MAT 5.3", 40_005_003, 40_005_003, "Old?")
      .with_answers(vec!["A".into()]);
    q.retext("New?");
    assert_eq!(q.text(), "New?");
    assert_eq!(q.alternate_forms, vec!["Old?".to_string()]);
    assert_eq!(q.answers, vec!["A".to_string()]);
    q.retext("");
    assert!(q.is_placeholder());
  }
}
