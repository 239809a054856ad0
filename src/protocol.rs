//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::question::{Question, QuestionRecord};

/// DTO for question delivery.
#[derive(Debug, Serialize)]
pub struct QuestionOut {
    pub scripture_reference: String,
    pub start_ref: i32,
    pub end_ref: i32,
    pub text: String,
    pub answers: Vec<String>,
    pub notes: Vec<String>,
    pub alternate_forms: Vec<String>,
    pub translation: Option<String>,
}

/// Convert a `Question` (internal) to the public DTO.
pub fn to_out(q: &Question, translation: Option<&str>) -> QuestionOut {
    let key = q.key();
    QuestionOut {
        scripture_reference: key.scripture_reference().to_string(),
        start_ref: key.start_ref(),
        end_ref: key.end_ref(),
        text: key.text().to_string(),
        answers: q.answers.clone(),
        notes: q.notes.clone(),
        alternate_forms: q.alternate_forms.clone(),
        translation: translation.map(str::to_string),
    }
}

//
// Questions
//

#[derive(Debug, Deserialize)]
pub struct QuestionsQuery {
    pub start: Option<i32>,
    pub end: Option<i32>,
}
#[derive(Serialize)]
pub struct QuestionsOut {
    pub questions: Vec<QuestionOut>,
}

#[derive(Deserialize)]
pub struct MatchIn {
    pub a: QuestionRecord,
    pub b: QuestionRecord,
}
#[derive(Serialize)]
pub struct MatchOut {
    pub matches: bool,
}

#[derive(Debug, Deserialize)]
pub struct FindIn {
    pub reference: String,
    pub text: String,
}
#[derive(Serialize)]
pub struct FindOut {
    pub question: Option<QuestionOut>,
}

//
// Translations
//

#[derive(Debug, Deserialize)]
pub struct TranslationQuery {
    pub reference: String,
    pub text: String,
}
#[derive(Debug, Deserialize)]
pub struct TranslationIn {
    pub reference: String,
    pub text: String,
    pub translation: String,
}
#[derive(Serialize)]
pub struct TranslationOut {
    pub reference: String,
    pub text: String,
    pub translation: Option<String>,
}

//
// Key terms
//

#[derive(Debug, Deserialize)]
pub struct TermQuery {
    pub term: String,
}
#[derive(Serialize)]
pub struct RuleOut {
    pub term: String,
    pub normalized: String,
    pub rule: Option<String>,
    pub excluded: bool,
    pub reference_only: bool,
}

#[derive(Debug, Deserialize)]
pub struct RenderingIn {
    pub term: String,
    pub rendering: String,
    #[serde(default)]
    pub preferred: bool,
}
#[derive(Serialize)]
pub struct RenderingOut {
    pub term: String,
    pub preferred: Option<String>,
    pub additional: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct OccurrencesQuery {
    pub term: String,
    pub start: Option<i32>,
    pub end: Option<i32>,
}
#[derive(Serialize)]
pub struct OccurrencesOut {
    pub term: String,
    pub occurrences: Vec<i32>,
    pub references: Vec<String>,
}

#[derive(Serialize)]
pub struct SuggestableOut {
    pub terms: Vec<String>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
