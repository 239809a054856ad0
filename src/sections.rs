//! The question catalog: sections of Scripture, each with categories of questions,
//! plus the customizations a project applies on top of the stock catalog.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::question::{normalize_text, Question, QuestionKey};
use crate::reference::{format_range, ranges_overlap};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub is_overview: bool,
  #[serde(default)]
  pub questions: Vec<Question>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SectionRecord")]
pub struct Section {
  pub heading: String,
  pub scripture_reference: String,
  pub start_ref: i32,
  pub end_ref: i32,
  pub categories: Vec<Category>,
}

/// Serialized shape of a section; an empty label is derived from the range.
#[derive(Deserialize)]
struct SectionRecord {
  heading: String,
  #[serde(default)]
  scripture_reference: String,
  start_ref: i32,
  end_ref: i32,
  #[serde(default)]
  categories: Vec<Category>,
}

impl From<SectionRecord> for Section {
  fn from(r: SectionRecord) -> Self {
    let mut section = Section::new(r.heading, r.start_ref, r.end_ref);
    if !r.scripture_reference.is_empty() {
      section.scripture_reference = r.scripture_reference;
    }
    section.categories = r.categories;
    section
  }
}

impl Section {
  pub fn new(heading: impl Into<String>, start_ref: i32, end_ref: i32) -> Self {
    Self {
      heading: heading.into(),
      scripture_reference: format_range(start_ref, end_ref),
      start_ref,
      end_ref,
      categories: Vec::new(),
    }
  }

  pub fn contains(&self, bcv: i32) -> bool {
    self.start_ref <= bcv && bcv <= self.end_ref
  }

  pub fn questions(&self) -> impl Iterator<Item = &Question> {
    self.categories.iter().flat_map(|c| c.questions.iter())
  }
}

/// What a customization does to the question it matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomizationKind {
  Deletion,
  Modification,
  InsertionBefore,
  AdditionAfter,
}

impl CustomizationKind {
  /// Lenient parse; unknown kinds yield `None`.
  pub fn parse(s: &str) -> Option<Self> {
    match s.trim() {
      "Deletion" => Some(Self::Deletion),
      "Modification" => Some(Self::Modification),
      "InsertionBefore" => Some(Self::InsertionBefore),
      "AdditionAfter" => Some(Self::AdditionAfter),
      _ => None,
    }
  }
}

/// A project-level change to one stock question, located by display reference
/// and original text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseCustomization {
  pub reference: String,
  pub original_phrase: String,
  #[serde(default)]
  pub modified_phrase: String,
  #[serde(rename = "type")]
  pub kind: String,
}

/// Ordered catalog of sections.
#[derive(Clone, Debug, Default)]
pub struct QuestionSections {
  sections: Vec<Section>,
}

impl QuestionSections {
  pub fn new(sections: Vec<Section>) -> Self {
    Self { sections }
  }

  pub fn sections(&self) -> &[Section] {
    &self.sections
  }

  pub fn questions(&self) -> impl Iterator<Item = &Question> {
    self.sections.iter().flat_map(Section::questions)
  }

  pub fn len(&self) -> usize {
    self.questions().count()
  }

  pub fn is_empty(&self) -> bool {
    self.questions().next().is_none()
  }

  pub fn find(&self, key: &QuestionKey) -> Option<&Question> {
    self.questions().find(|q| q.key().matches(key))
  }

  /// Lookup by display reference and raw text (normalized here).
  pub fn find_by_reference(&self, reference: &str, text: &str) -> Option<&Question> {
    let text = normalize_text(text);
    self.questions().find(|q| q.key().matches_reference(reference, &text))
  }

  pub fn questions_in_range(&self, start: i32, end: i32) -> Vec<&Question> {
    self
      .questions()
      .filter(|q| ranges_overlap(q.key().start_ref(), q.key().end_ref(), start, end))
      .collect()
  }

  pub fn section_for(&self, bcv: i32) -> Option<&Section> {
    self.sections.iter().find(|s| s.contains(bcv))
  }

  /// Applies customizations in order. Returns the ones that matched no question
  /// or had an unknown kind.
  #[instrument(level = "info", skip_all, fields(count = customizations.len()))]
  pub fn apply_customizations(&mut self, customizations: &[PhraseCustomization]) -> Vec<PhraseCustomization> {
    let mut unapplied = Vec::new();
    for c in customizations {
      let Some(kind) = CustomizationKind::parse(&c.kind) else {
        warn!(target: "questions", reference = %c.reference, kind = %c.kind, "Unknown customization kind; skipped");
        unapplied.push(c.clone());
        continue;
      };
      if self.apply_one(c, kind) {
        debug!(target: "questions", reference = %c.reference, ?kind, "Customization applied");
      } else {
        warn!(target: "questions", reference = %c.reference, phrase = %c.original_phrase, "Customization matched no question");
        unapplied.push(c.clone());
      }
    }
    info!(target: "questions", applied = customizations.len() - unapplied.len(), unapplied = unapplied.len(), "Customizations processed");
    unapplied
  }

  /// Position of the question a customization names: first by current text,
  /// then by a text an earlier modification replaced.
  fn locate(&self, reference: &str, original: &str) -> Option<(usize, usize, usize)> {
    let by_current = |q: &Question| q.key().matches_reference(reference, original);
    let by_previous = |q: &Question| {
      q.key().scripture_reference() == reference && q.alternate_forms.iter().any(|f| f == original)
    };
    let find = |pred: &dyn Fn(&Question) -> bool| {
      self.sections.iter().enumerate().find_map(|(si, section)| {
        section.categories.iter().enumerate().find_map(|(ci, category)| {
          category.questions.iter().position(|q| pred(q)).map(|qi| (si, ci, qi))
        })
      })
    };
    find(&by_current).or_else(|| find(&by_previous))
  }

  fn apply_one(&mut self, c: &PhraseCustomization, kind: CustomizationKind) -> bool {
    let original = normalize_text(&c.original_phrase);
    let Some((si, ci, idx)) = self.locate(&c.reference, &original) else {
      return false;
    };
    let questions = &mut self.sections[si].categories[ci].questions;
    match kind {
      CustomizationKind::Deletion => {
        questions.remove(idx);
      }
      CustomizationKind::Modification => {
        questions[idx].retext(&c.modified_phrase);
      }
      CustomizationKind::InsertionBefore | CustomizationKind::AdditionAfter => {
        let added = Question::new(questions[idx].key().with_text(&c.modified_phrase));
        let at = if kind == CustomizationKind::InsertionBefore { idx } else { idx + 1 };
        questions.insert(at, added);
      }
    }
    true
  }
}
