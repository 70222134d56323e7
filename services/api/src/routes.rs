use crate::infra::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use degreepath::content::{self, PostSummary, ResourceItem, TimelineStep};
use degreepath::error::AppError;
use degreepath::i18n::{resolve_lang_param, with_lang, Lang};
use degreepath::shortlist::{
    public_error_message, Questionnaire, Recommendation, ScoredProgram, ShortlistAnswers,
    ShortlistError,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::atomic::Ordering;
use tracing::warn;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LangQuery {
    #[serde(default)]
    pub(crate) lang: Option<String>,
}

impl LangQuery {
    fn resolve(&self) -> Lang {
        resolve_lang_param(self.lang.as_deref()).unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ShortlistRequest {
    #[serde(default)]
    pub(crate) lang: Option<String>,
    #[serde(default)]
    pub(crate) answers: Option<ShortlistAnswers>,
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PostListItem {
    #[serde(flatten)]
    pub(crate) summary: PostSummary,
    pub(crate) href: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct PostListResponse {
    pub(crate) lang: Lang,
    pub(crate) count: usize,
    pub(crate) posts: Vec<PostListItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostDetailResponse {
    pub(crate) lang: Lang,
    #[serde(flatten)]
    pub(crate) post: content::Post,
    pub(crate) href: String,
    pub(crate) alternate_href: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ShortlistResponse<T> {
    pub(crate) results: Vec<T>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ShortlistErrorBody {
    pub(crate) error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) detail: Option<String>,
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/posts", get(list_posts))
        .route("/api/posts/:slug", get(post_detail))
        .route("/api/timeline", get(list_timeline))
        .route("/api/timeline/:slug", get(timeline_detail))
        .route("/api/resources", get(list_resources))
        .route("/api/resources/:slug", get(resource_detail))
        .route("/api/questionnaire", get(questionnaire_endpoint))
        .route("/api/school-shortlist", post(advisor_shortlist))
        .route("/api/school-shortlist/rules", post(rule_shortlist))
        .with_state(state)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
) -> Result<Json<PostListResponse>, AppError> {
    let lang = query.resolve();
    let posts: Vec<PostListItem> = state
        .posts
        .summaries()?
        .into_iter()
        .map(|summary| PostListItem {
            href: with_lang(&format!("/posts/{}", summary.slug), lang),
            summary,
        })
        .collect();

    Ok(Json(PostListResponse {
        lang,
        count: posts.len(),
        posts,
    }))
}

pub(crate) async fn post_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<LangQuery>,
) -> Result<Json<PostDetailResponse>, AppError> {
    let lang = query.resolve();
    let post = state
        .posts
        .by_slug(&slug)?
        .ok_or_else(|| AppError::NotFound(format!("post '{slug}'")))?;
    let path = format!("/posts/{slug}");

    Ok(Json(PostDetailResponse {
        lang,
        href: with_lang(&path, lang),
        alternate_href: with_lang(&path, lang.other()),
        post,
    }))
}

pub(crate) async fn list_timeline() -> Json<&'static [TimelineStep]> {
    Json(content::timeline_steps())
}

pub(crate) async fn timeline_detail(
    Path(slug): Path<String>,
) -> Result<Json<&'static TimelineStep>, AppError> {
    content::timeline_step_by_slug(&slug)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("timeline step '{slug}'")))
}

pub(crate) async fn list_resources() -> Json<&'static [ResourceItem]> {
    Json(content::resource_items())
}

pub(crate) async fn resource_detail(
    Path(slug): Path<String>,
) -> Result<Json<&'static ResourceItem>, AppError> {
    content::resource_by_slug(&slug)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("resource '{slug}'")))
}

pub(crate) async fn questionnaire_endpoint(State(state): State<AppState>) -> Json<Questionnaire> {
    Json(state.shortlist.questionnaire().clone())
}

pub(crate) async fn advisor_shortlist(
    State(state): State<AppState>,
    payload: Result<Json<ShortlistRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return malformed_request(&state, Lang::Zh, rejection),
    };
    let lang = Lang::from_body_hint(request.lang.as_deref());
    let answers = request.answers.unwrap_or_default();

    match state.shortlist.recommend(&answers, lang).await {
        Ok(results) => Json(ShortlistResponse::<Recommendation> { results }).into_response(),
        Err(err) => shortlist_failure(&state, lang, err),
    }
}

pub(crate) async fn rule_shortlist(
    State(state): State<AppState>,
    payload: Result<Json<ShortlistRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return malformed_request(&state, Lang::Zh, rejection),
    };
    let lang = Lang::from_body_hint(request.lang.as_deref());
    let answers = request.answers.unwrap_or_default();

    match state.shortlist.rank(&answers, lang, request.limit) {
        Ok(results) => Json(ShortlistResponse::<ScoredProgram> { results }).into_response(),
        Err(err) => shortlist_failure(&state, lang, err),
    }
}

fn shortlist_failure(state: &AppState, lang: Lang, err: ShortlistError) -> Response {
    let status = err.status();
    warn!(status, error = %err, "shortlist request failed");
    error_response(state, lang, status, err.detail())
}

fn malformed_request(state: &AppState, lang: Lang, rejection: JsonRejection) -> Response {
    warn!(error = %rejection, "malformed shortlist request");
    error_response(state, lang, 400, rejection.body_text())
}

fn error_response(state: &AppState, lang: Lang, status: u16, detail: String) -> Response {
    let code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = ShortlistErrorBody {
        error: public_error_message(code.as_u16(), lang),
        detail: (!state.environment.is_production()).then_some(detail),
    };
    (code, Json(body)).into_response()
}
