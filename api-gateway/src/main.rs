//! Premia API Gateway
//!
//! Serves the single-form quote UI and the prediction API:
//! - `GET /` - the quote form
//! - `GET /api/schema` - form-field metadata (domains, defaults, categories)
//! - `POST /api/predict` - one QuoteRequest in, one premium out
//! - `GET /health` - liveness
//!
//! The pipeline artifact is loaded once at startup from `MODEL_PATH` and
//! held as immutable shared state; a missing or corrupt artifact is fatal.

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use premia_common::{FieldSpec, PredictionResult, QuoteRequest};
use premia_model::{GbmPipeline, Predictor};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

// ============ STATE ============

#[derive(Clone)]
struct AppState {
    predictor: Arc<dyn Predictor>,
    model_path: Arc<str>,
}

// ============ RESPONSE TYPES ============

#[derive(Debug, Serialize, Deserialize)]
struct PredictResponse {
    premium: f64,
    /// Display form, two decimal places
    formatted: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> impl IntoResponse {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

// ============ HANDLERS ============

async fn index() -> Html<&'static str> {
    Html(include_str!("index.html"))
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "model_path": &*state.model_path,
    }))
}

async fn get_schema() -> Json<Vec<FieldSpec>> {
    Json(premia_common::form_fields())
}

async fn predict(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<PredictResponse>, axum::response::Response> {
    // Domain constraints are enforced here, at the collection boundary;
    // the feature step and the model trust their inputs.
    if let Err(e) = request.validate() {
        return Err(error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response());
    }

    let row = request.to_row();
    match state.predictor.predict_one(&row) {
        Ok(premium) => {
            let result = PredictionResult::new(premium);
            info!(premium, "prediction served");
            Ok(Json(PredictResponse {
                premium: result.premium,
                formatted: result.formatted(),
            }))
        }
        Err(e) => {
            // Surface the underlying message inline; no retry, no fallback.
            warn!(error = %e, "prediction failed");
            Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response())
        }
    }
}

// ============ ROUTER ============

fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/schema", get(get_schema))
        .route("/api/predict", post(predict))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

// ============ MAIN ============

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("premia_gateway=info".parse()?),
        )
        .json()
        .init();

    dotenvy::dotenv().ok();

    let model_path =
        std::env::var("MODEL_PATH").unwrap_or_else(|_| "model/premia_gbm.json".to_string());

    // One predictor, loaded once; nothing to serve without it.
    let pipeline = GbmPipeline::load(&model_path)
        .map_err(|e| anyhow::anyhow!("cannot start without a model artifact: {}", e))?;

    let state = AppState {
        predictor: Arc::new(pipeline),
        model_path: model_path.into(),
    };

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let addr = format!("0.0.0.0:{}", port);
    info!("Premia gateway starting on {}", addr);
    info!("Endpoints: /, /health, /api/schema, /api/predict");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

// ============ TESTS ============

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use premia_common::{PredictionError, RowFrame};
    use tower::ServiceExt;

    /// Predictor stub returning a fixed premium
    struct FixedPredictor(f64);

    impl Predictor for FixedPredictor {
        fn predict_one(&self, _row: &RowFrame) -> Result<f64, PredictionError> {
            Ok(self.0)
        }
    }

    /// Predictor stub failing with a fixed message
    struct FailingPredictor(&'static str);

    impl Predictor for FailingPredictor {
        fn predict_one(&self, _row: &RowFrame) -> Result<f64, PredictionError> {
            Err(PredictionError::Internal(self.0.to_string()))
        }
    }

    fn test_app(predictor: Arc<dyn Predictor>) -> Router {
        app(AppState {
            predictor,
            model_path: "test://stub".into(),
        })
    }

    async fn post_json(router: Router, uri: &str, body: &impl serde::Serialize) -> (StatusCode, Vec<u8>) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_default_request_formats_to_two_decimals() {
        let router = test_app(Arc::new(FixedPredictor(1234.5)));
        let (status, body) = post_json(router, "/api/predict", &QuoteRequest::default()).await;

        assert_eq!(status, StatusCode::OK);
        let response: PredictResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.premium, 1234.5);
        assert_eq!(response.formatted, "1234.50");
    }

    #[tokio::test]
    async fn test_predictor_failure_surfaces_underlying_message() {
        let router = test_app(Arc::new(FailingPredictor("feature shape mismatch")));
        let (status, body) = post_json(router, "/api/predict", &QuoteRequest::default()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let response: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.error, "feature shape mismatch");
    }

    #[tokio::test]
    async fn test_out_of_domain_input_is_rejected() {
        let router = test_app(Arc::new(FixedPredictor(1.0)));
        let request = QuoteRequest {
            age: 17,
            ..QuoteRequest::default()
        };
        let (status, body) = post_json(router, "/api/predict", &request).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let response: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(response.error.contains("age"));
    }

    #[tokio::test]
    async fn test_health_reports_model_path() {
        let router = test_app(Arc::new(FixedPredictor(1.0)));
        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["status"], "healthy");
        assert_eq!(value["model_path"], "test://stub");
    }

    #[tokio::test]
    async fn test_schema_lists_every_form_field() {
        let router = test_app(Arc::new(FixedPredictor(1.0)));
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/schema")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let fields: Vec<serde_json::Value> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(fields.len(), 18);
    }

    #[tokio::test]
    async fn test_index_serves_the_quote_form() {
        let router = test_app(Arc::new(FixedPredictor(1.0)));
        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Predict Premium"));
    }

    #[tokio::test]
    async fn test_end_to_end_with_demo_pipeline() {
        let router = test_app(Arc::new(premia_model::demo_pipeline()));
        let (status, body) = post_json(router, "/api/predict", &QuoteRequest::default()).await;

        assert_eq!(status, StatusCode::OK);
        let response: PredictResponse = serde_json::from_slice(&body).unwrap();
        assert!(response.premium.is_finite());
        assert_eq!(response.formatted, format!("{:.2}", response.premium));
    }
}
