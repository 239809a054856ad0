//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{State, Query}, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::protocol::*;
use crate::state::AppState;
use crate::logic::*;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_questions(
  State(state): State<Arc<AppState>>,
  Query(q): Query<QuestionsQuery>,
) -> impl IntoResponse {
  let questions = list_questions(&state, q.start, q.end).await;
  info!(target: "questions", count = questions.len(), "HTTP questions served");
  Json(QuestionsOut { questions })
}

#[instrument(level = "info", skip_all)]
pub async fn http_post_match(Json(body): Json<MatchIn>) -> impl IntoResponse {
  Json(MatchOut { matches: match_keys(&body.a, &body.b) })
}

#[instrument(level = "info", skip(state, body), fields(%body.reference, text_len = body.text.len()))]
pub async fn http_post_find(
  State(state): State<Arc<AppState>>,
  Json(body): Json<FindIn>,
) -> impl IntoResponse {
  let question = find_question(&state, &body.reference, &body.text).await;
  info!(target: "questions", reference = %body.reference, found = question.is_some(), "HTTP find served");
  Json(FindOut { question })
}

#[instrument(level = "info", skip(state, q), fields(%q.reference))]
pub async fn http_get_translation(
  State(state): State<Arc<AppState>>,
  Query(q): Query<TranslationQuery>,
) -> impl IntoResponse {
  let translation = get_translation(&state, &q.reference, &q.text).await;
  Json(TranslationOut { reference: q.reference, text: q.text, translation })
}

#[instrument(level = "info", skip(state, body), fields(%body.reference, text_len = body.text.len()))]
pub async fn http_post_translation(
  State(state): State<Arc<AppState>>,
  Json(body): Json<TranslationIn>,
) -> impl IntoResponse {
  let translation = set_translation(&state, &body.reference, &body.text, &body.translation).await;
  Json(TranslationOut { reference: body.reference, text: body.text, translation })
}

#[instrument(level = "info", skip(state), fields(%q.term))]
pub async fn http_get_rule(
  State(state): State<Arc<AppState>>,
  Query(q): Query<TermQuery>,
) -> impl IntoResponse {
  Json(rule_for_term(&state, &q.term))
}

#[instrument(level = "info", skip(state), fields(%q.term))]
pub async fn http_get_rendering(
  State(state): State<Arc<AppState>>,
  Query(q): Query<TermQuery>,
) -> impl IntoResponse {
  Json(rendering_for_term(&state, &q.term).await)
}

#[instrument(level = "info", skip(state, body), fields(%body.term, preferred = body.preferred))]
pub async fn http_post_rendering(
  State(state): State<Arc<AppState>>,
  Json(body): Json<RenderingIn>,
) -> impl IntoResponse {
  Json(add_rendering(&state, &body.term, &body.rendering, body.preferred).await)
}

#[instrument(level = "info", skip(state), fields(%q.term))]
pub async fn http_get_occurrences(
  State(state): State<Arc<AppState>>,
  Query(q): Query<OccurrencesQuery>,
) -> impl IntoResponse {
  let occurrences = term_occurrences(&state, &q.term, q.start, q.end);
  let references = occurrence_labels(&occurrences);
  Json(OccurrencesOut { term: q.term, occurrences, references })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_suggestable(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(SuggestableOut { terms: suggestable_terms(&state) })
}
