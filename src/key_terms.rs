//! Key biblical terms: rule lookup, occurrence filtering and renderings.
//!
//! Term ids and their alternates are compared in lower-cased NFD form
//! (`normalize`). Question text uses NFC with case preserved; the two policies
//! must not be mixed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use unicode_normalization::UnicodeNormalization;

use crate::reference::ranges_overlap;

/// Canonical form of a term name: lower-cased, then decomposed.
pub fn normalize(name: &str) -> String {
  name.to_lowercase().nfd().collect()
}

/// What a rule does to occurrences of its term.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RuleType {
  /// Count occurrences for references, but never match rendering text.
  MatchForRefOnly,
  /// Ignore the term entirely.
  Exclude,
}

impl RuleType {
  /// Lenient parse: anything unrecognized is "no rule".
  pub fn parse(s: &str) -> Option<Self> {
    match s.trim() {
      "MatchForRefOnly" => Some(RuleType::MatchForRefOnly),
      "Exclude" => Some(RuleType::Exclude),
      other => {
        if !other.is_empty() {
          warn!(target: "key_terms", rule = %other, "Unrecognized key term rule; treating as no rule");
        }
        None
      }
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      RuleType::MatchForRefOnly => "MatchForRefOnly",
      RuleType::Exclude => "Exclude",
    }
  }
}

/// Serialized shape of a rule.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct KeyTermRuleRecord {
  pub id: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rule: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub alternates: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "KeyTermRuleRecord", into = "KeyTermRuleRecord")]
pub struct KeyTermRule {
  id: String,
  rule: Option<RuleType>,
  alternates: Vec<String>,
}

impl KeyTermRule {
  pub fn new<I, S>(id: &str, rule: Option<RuleType>, alternates: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut alts: Vec<String> = Vec::new();
    for a in alternates {
      let n = normalize(a.as_ref());
      if !n.is_empty() && !alts.contains(&n) {
        alts.push(n);
      }
    }
    Self { id: normalize(id), rule, alternates: alts }
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn rule(&self) -> Option<RuleType> {
    self.rule
  }

  pub fn alternates(&self) -> &[String] {
    &self.alternates
  }
}

impl From<KeyTermRuleRecord> for KeyTermRule {
  fn from(r: KeyTermRuleRecord) -> Self {
    let rule = r.rule.as_deref().and_then(RuleType::parse);
    KeyTermRule::new(&r.id, rule, r.alternates)
  }
}

impl From<KeyTermRule> for KeyTermRuleRecord {
  fn from(r: KeyTermRule) -> Self {
    KeyTermRuleRecord {
      id: r.id,
      rule: r.rule.map(|t| t.as_str().to_string()),
      alternates: r.alternates,
    }
  }
}

/// First rule whose id matches `term_id`; failing that, the first rule listing
/// it as an alternate.
pub fn find_rule<'a>(rules: &'a [KeyTermRule], term_id: &str) -> Option<&'a KeyTermRule> {
  let wanted = normalize(term_id);
  rules
    .iter()
    .find(|r| r.id == wanted)
    .or_else(|| rules.iter().find(|r| r.alternates.iter().any(|a| *a == wanted)))
}

pub fn is_excluded(rule: &KeyTermRule) -> bool {
  rule.rule == Some(RuleType::Exclude)
}

pub fn is_reference_only(rule: &KeyTermRule) -> bool {
  rule.rule == Some(RuleType::MatchForRefOnly)
}

/// Ordered rule set with term-name lookups. A term without a rule is unrestricted.
#[derive(Clone, Debug, Default)]
pub struct KeyTermRules {
  rules: Vec<KeyTermRule>,
}

impl KeyTermRules {
  pub fn new(rules: Vec<KeyTermRule>) -> Self {
    Self { rules }
  }

  pub fn rules(&self) -> &[KeyTermRule] {
    &self.rules
  }

  pub fn find(&self, term: &str) -> Option<&KeyTermRule> {
    find_rule(&self.rules, term)
  }

  pub fn is_excluded(&self, term: &str) -> bool {
    self.find(term).is_some_and(is_excluded)
  }

  pub fn is_reference_only(&self, term: &str) -> bool {
    self.find(term).is_some_and(is_reference_only)
  }
}

/// A key term as supplied by the term source.
pub trait KeyTerm {
  fn term(&self) -> &str;
  fn renderings(&self) -> &[String];
  fn best_rendering(&self) -> Option<&str>;
  /// `BBBCCCVVV` references where the term occurs.
  fn occurrences(&self) -> &[i32];
}

/// In-memory key term loaded from configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct KeyTermEntry {
  pub term: String,
  #[serde(default)]
  pub renderings: Vec<String>,
  #[serde(default)]
  pub best_rendering: Option<String>,
  #[serde(default)]
  pub occurrences: Vec<i32>,
}

impl KeyTerm for KeyTermEntry {
  fn term(&self) -> &str {
    &self.term
  }
  fn renderings(&self) -> &[String] {
    &self.renderings
  }
  fn best_rendering(&self) -> Option<&str> {
    self.best_rendering.as_deref().or_else(|| self.renderings.first().map(String::as_str))
  }
  fn occurrences(&self) -> &[i32] {
    &self.occurrences
  }
}

/// Occurrences of `term` within `start..=end`. Excluded terms have none.
pub fn occurrences_in_range<T: KeyTerm + ?Sized>(term: &T, rules: &KeyTermRules, start: i32, end: i32) -> Vec<i32> {
  if rules.is_excluded(term.term()) {
    debug!(target: "key_terms", term = %term.term(), "Excluded term has no occurrences");
    return Vec::new();
  }
  term
    .occurrences()
    .iter()
    .copied()
    .filter(|&r| ranges_overlap(r, r, start, end))
    .collect()
}

/// Terms whose renderings may be matched against translated text.
pub fn terms_for_rendering_match<'a, T: KeyTerm>(terms: &'a [T], rules: &KeyTermRules) -> Vec<&'a T> {
  terms
    .iter()
    .filter(|t| match rules.find(t.term()) {
      Some(rule) => !is_excluded(rule) && !is_reference_only(rule),
      None => true,
    })
    .collect()
}

/// Renderings chosen by the translator for one term.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyTermRenderingInfo {
  pub term_id: String,
  #[serde(default)]
  pub preferred_rendering: String,
  #[serde(default)]
  pub additional_renderings: Vec<String>,
}

/// Rendering info keyed by normalized term id.
#[derive(Clone, Debug, Default)]
pub struct KeyTermRenderings {
  by_term: HashMap<String, KeyTermRenderingInfo>,
}

impl KeyTermRenderings {
  pub fn new(infos: Vec<KeyTermRenderingInfo>) -> Self {
    let mut by_term = HashMap::new();
    for info in infos {
      by_term.entry(normalize(&info.term_id)).or_insert(info);
    }
    Self { by_term }
  }

  pub fn get(&self, term_id: &str) -> Option<&KeyTermRenderingInfo> {
    self.by_term.get(&normalize(term_id))
  }

  /// Translator's preferred rendering, else the term source's best rendering.
  pub fn preferred<T: KeyTerm + ?Sized>(&self, term: &T) -> Option<String> {
    self
      .get(term.term())
      .map(|i| i.preferred_rendering.as_str())
      .filter(|s| !s.is_empty())
      .or_else(|| term.best_rendering())
      .map(str::to_string)
  }

  fn entry(&mut self, term_id: &str) -> &mut KeyTermRenderingInfo {
    self.by_term.entry(normalize(term_id)).or_insert_with(|| KeyTermRenderingInfo {
      term_id: term_id.to_string(),
      ..Default::default()
    })
  }

  /// Adds an additional rendering. Returns false if empty or already known.
  pub fn add_rendering(&mut self, term_id: &str, rendering: &str) -> bool {
    let rendering = rendering.trim();
    if rendering.is_empty() {
      return false;
    }
    let info = self.entry(term_id);
    if info.preferred_rendering == rendering || info.additional_renderings.iter().any(|r| r == rendering) {
      return false;
    }
    info.additional_renderings.push(rendering.to_string());
    true
  }

  /// Makes `rendering` preferred; the previous preferred one becomes additional.
  pub fn set_preferred(&mut self, term_id: &str, rendering: &str) {
    let rendering = rendering.trim();
    if rendering.is_empty() {
      return;
    }
    let info = self.entry(term_id);
    if info.preferred_rendering == rendering {
      return;
    }
    info.additional_renderings.retain(|r| r != rendering);
    let previous = std::mem::replace(&mut info.preferred_rendering, rendering.to_string());
    if !previous.is_empty() {
      info.additional_renderings.push(previous);
    }
  }
}
