//! Seed data used when no project config is available.

use crate::key_terms::{KeyTermEntry, KeyTermRenderingInfo, KeyTermRule, RuleType};
use crate::question::Question;
use crate::sections::{Category, Section};

/// Minimal catalog that keeps the service useful without a config file.
pub fn seed_sections() -> Vec<Section> {
  let mut beatitudes = Section::new("The Beatitudes", 40_005_001, 40_005_012);
  beatitudes.categories = vec![
    Category {
      name: "Overview".into(),
      is_overview: true,
      questions: vec![
        Question::ranged("", 40_005_001, 40_005_012, "What kind of people does Jesus say are blessed?")
          .with_answers(vec!["People who are humble and who long for God's rule.".into()]),
        Question::unranged("What is the main idea of this passage?"),
      ],
    },
    Category {
      name: "Details".into(),
      is_overview: false,
      questions: vec![
        Question::ranged("", 40_005_003, 40_005_003, "Who did Jesus say are blessed?")
          .with_answers(vec!["The poor in spirit.".into()])
          .with_notes(vec!["\"Poor in spirit\" means those who know they need God.".into()]),
        Question::ranged("", 40_005_004, 40_005_004, "What will happen to those who mourn?")
          .with_answers(vec!["God will comfort them.".into()]),
      ],
    },
  ];

  let mut transfiguration = Section::new("The transfiguration", 40_017_001, 40_017_013);
  transfiguration.categories = vec![Category {
    name: "Details".into(),
    is_overview: false,
    questions: vec![
      Question::ranged("", 40_017_003, 40_017_003, "Who appeared and talked with Jesus?")
        .with_answers(vec!["Moses and Elijah.".into()]),
    ],
  }];

  vec![beatitudes, transfiguration]
}

pub fn seed_rules() -> Vec<KeyTermRule> {
  vec![
    KeyTermRule::new("Moses", Some(RuleType::MatchForRefOnly), ["Moshe"]),
    KeyTermRule::new("blessed", Some(RuleType::Exclude), ["bless"]),
  ]
}

pub fn seed_key_terms() -> Vec<KeyTermEntry> {
  vec![
    KeyTermEntry {
      term: "Moses".into(),
      renderings: vec!["Moses".into()],
      best_rendering: None,
      occurrences: vec![2_002_010, 40_017_003, 40_017_004],
    },
    KeyTermEntry {
      term: "Elijah".into(),
      renderings: vec!["Elijah".into()],
      best_rendering: None,
      occurrences: vec![11_017_001, 40_017_003, 40_017_010],
    },
    KeyTermEntry {
      term: "blessed".into(),
      renderings: vec![],
      best_rendering: None,
      occurrences: vec![40_005_003, 40_005_004, 40_005_005],
    },
  ]
}

pub fn seed_renderings() -> Vec<KeyTermRenderingInfo> {
  vec![KeyTermRenderingInfo {
    term_id: "Elijah".into(),
    preferred_rendering: "Elias".into(),
    additional_renderings: vec![],
  }]
}
