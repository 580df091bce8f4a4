//! Request handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::analysis_service::AnalysisReport;
use crate::error::VerazError;
use crate::server::AppState;
use crate::server::page::{PageView, render};

/// Fields of the HTML form. An unchecked checkbox is simply absent.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub show_source: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(default)]
    pub include_source: bool,
}

/// JSON error body with its status code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl From<VerazError> for ApiError {
    fn from(err: VerazError) -> Self {
        let status = if err.is_user_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub async fn index() -> Html<String> {
    Html(render(&PageView::default()))
}

pub async fn analyze_form(
    State(state): State<AppState>,
    Form(form): Form<AnalyzeForm>,
) -> Html<String> {
    let show_source = form.show_source.is_some();
    let outcome = state.analyze(&form.text, show_source).await;
    let message = outcome.as_ref().err().map(|e| {
        if !e.is_user_error() {
            log::error!("analysis failed: {e}");
        }
        e.to_string()
    });

    let mut view = PageView {
        text: &form.text,
        show_source,
        ..PageView::default()
    };
    match &outcome {
        Ok(report) => view.report = Some(report),
        Err(e) if e.is_user_error() => view.warning = message.as_deref(),
        Err(_) => view.error = message.as_deref(),
    }

    Html(render(&view))
}

pub async fn analyze_json(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let report = state.analyze(&request.text, request.include_source).await?;
    Ok(Json(report))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::analysis_service::{AnalysisService, EMPTY_INPUT_MESSAGE};
    use crate::ml::{
        Classifier, ClassifierPipeline, InferenceService, LogisticRegression, PipelineMetadata,
        TfIdfVectorizer,
    };
    use crate::summary::Summarizer;

    fn state() -> AppState {
        let mut vectorizer = TfIdfVectorizer::default();
        vectorizer.fit(&["milagro urgente".to_string()]).unwrap();
        let weights = vec![1.0; vectorizer.vocabulary_size()];
        let pipeline = ClassifierPipeline::new(
            vectorizer,
            Classifier::Probabilistic(LogisticRegression::from_parts(weights, -0.5)),
            PipelineMetadata::new(1),
        )
        .unwrap();

        Arc::new(AnalysisService::new(
            Arc::new(InferenceService::new(pipeline)),
            Arc::new(Summarizer::disabled()),
        ))
    }

    #[tokio::test]
    async fn test_form_submission() {
        let form = AnalyzeForm {
            text: "¡Milagro URGENTE! <b>ya</b>".to_string(),
            show_source: Some("on".to_string()),
        };
        let Html(html) = analyze_form(State(state()), Form(form)).await;

        assert!(html.contains("Resultado"));
        assert!(html.contains("Texto original"));
        assert!(html.contains("&lt;b&gt;ya&lt;/b&gt;"));
    }

    #[tokio::test]
    async fn test_form_empty_text_warns() {
        let Html(html) = analyze_form(State(state()), Form(AnalyzeForm::default())).await;
        assert!(html.contains(EMPTY_INPUT_MESSAGE));
        assert!(!html.contains("Resultado"));
    }

    #[tokio::test]
    async fn test_json_analyze() {
        let request = AnalyzeRequest {
            text: "milagro urgente".to_string(),
            include_source: false,
        };
        let Json(report) = analyze_json(State(state()), Json(request)).await.unwrap();
        assert!(report.prediction.probability_of_fake > 0.5);
        assert!(report.source_text.is_none());
    }

    #[tokio::test]
    async fn test_json_empty_text_is_bad_request() {
        let request = AnalyzeRequest {
            text: "  ".to_string(),
            include_source: true,
        };
        let err = analyze_json(State(state()), Json(request)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, EMPTY_INPUT_MESSAGE);
    }

    #[tokio::test]
    async fn test_health() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "ok");
    }
}
