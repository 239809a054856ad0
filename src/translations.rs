//! Translated question text, keyed by display reference and phrase.

use serde::{Deserialize, Serialize};

use crate::question::{normalize_text, Question};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TranslationRecord")]
pub struct XmlTranslation {
  reference: String,
  phrase_key: String,
  translation: String,
}

#[derive(Deserialize)]
struct TranslationRecord {
  reference: String,
  phrase_key: String,
  #[serde(default)]
  translation: String,
}

impl From<TranslationRecord> for XmlTranslation {
  fn from(r: TranslationRecord) -> Self {
    XmlTranslation::new(r.reference, &r.phrase_key, r.translation)
  }
}

impl XmlTranslation {
  pub fn new(reference: impl Into<String>, phrase: &str, translation: impl Into<String>) -> Self {
    Self {
      reference: reference.into(),
      phrase_key: normalize_text(phrase),
      translation: translation.into(),
    }
  }

  pub fn reference(&self) -> &str {
    &self.reference
  }

  /// Phrase in NFC form.
  pub fn phrase_key(&self) -> &str {
    &self.phrase_key
  }

  pub fn translation(&self) -> &str {
    &self.translation
  }

  fn is_for(&self, reference: &str, phrase: &str) -> bool {
    self.reference == reference && self.phrase_key == phrase
  }
}

#[derive(Clone, Debug, Default)]
pub struct Translations {
  items: Vec<XmlTranslation>,
}

impl Translations {
  pub fn new(items: Vec<XmlTranslation>) -> Self {
    let mut t = Self::default();
    for item in items {
      t.set(&item.reference, &item.phrase_key, &item.translation);
    }
    t
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn find(&self, reference: &str, phrase: &str) -> Option<&XmlTranslation> {
    let phrase = normalize_text(phrase);
    self.items.iter().find(|t| t.is_for(reference, &phrase))
  }

  /// Inserts or replaces. An empty translation removes the entry.
  pub fn set(&mut self, reference: &str, phrase: &str, translation: &str) {
    let phrase = normalize_text(phrase);
    let existing = self.items.iter().position(|t| t.is_for(reference, &phrase));
    match (existing, translation.trim().is_empty()) {
      (Some(i), true) => {
        self.items.remove(i);
      }
      (Some(i), false) => self.items[i].translation = translation.to_string(),
      (None, true) => {}
      (None, false) => self.items.push(XmlTranslation::new(reference, &phrase, translation)),
    }
  }

  pub fn translation_for(&self, question: &Question) -> Option<&str> {
    let key = question.key();
    self
      .items
      .iter()
      .find(|t| key.matches_reference(&t.reference, &t.phrase_key))
      .map(|t| t.translation.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn set_find_and_remove() {
    let mut t = Translations::default();
    t.set("MAT 5.3", "Who is blessed?", "¿Quién es bienaventurado?");
    assert_eq!(t.find("MAT 5.3", "Who is blessed?").map(XmlTranslation::translation), Some("¿Quién es bienaventurado?"));

    t.set("MAT 5.3", "Who is blessed?", "¿Quiénes son dichosos?");
    assert_eq!(t.len(), 1);

    t.set("MAT 5.3", "Who is blessed?", "  ");
    assert!(t.is_empty());
  }

  #[test]
  fn deserialized_phrase_key_is_composed() {
    let t: XmlTranslation =
      serde_json::from_str(r#"{"reference": "MAT 1.18", "phrase_key": "Who is Jose\u0301?", "translation": "x"}"#).unwrap();
    assert_eq!(t.phrase_key(), "Who is Jos\u{00E9}?");
    assert_eq!(t.reference(), "MAT 1.18");
  }

  #[test]
  fn lookup_for_question_uses_display_reference() {
    let t = Translations::new(vec![XmlTranslation::new("MAT 1.18", "Who is Jose\u{0301}?", "¿Quién es José?")]);
    let q = Question::ranged("MAT 1.18", 40_001_018, 40_001_018, "Who is Jos\u{00E9}?");
    assert_eq!(t.translation_for(&q), Some("¿Quién es José?"));

    let relabeled = Question::ranged("Matthew 1:18", 40_001_018, 40_001_018, "Who is Jos\u{00E9}?");
    assert_eq!(t.translation_for(&relabeled), None);
  }
}
