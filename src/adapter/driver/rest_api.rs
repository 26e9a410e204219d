use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::adapter::driven::InMemoryOrderRepository;
use crate::adapter::driver::request_dto::CreateOrderRequest;
use crate::adapter::driver::response_dto::OrderResponse;
use crate::application::service::OrderApplicationService;
use crate::application::ApplicationError;
use crate::domain::error::DomainError;
use crate::domain::model::OrderId;
use crate::domain::port::RepositoryError;

/// REST API用のエラーレスポンスDTO
#[derive(Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

// アプリケーションサービスを含む状態
pub type AppState = AppStateInner;

#[derive(Clone)]
pub struct AppStateInner {
    pub order_service: Arc<OrderApplicationService<InMemoryOrderRepository>>,
}

// REST APIルーターを作成
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/orders", post(create_order))
        .route("/orders/:order_id", get(get_order_by_id))
}

// ヘルスチェックエンドポイント
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "hotel-booking-management",
        "version": "0.1.0"
    }))
}

// 注文作成エンドポイント
// 注文は未処理として受け付けられ、予約はワーカーが非同期に行う
async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), (StatusCode, Json<ApiError>)> {
    match state.order_service.create_order(request.into_draft()).await {
        Ok(order) => Ok((StatusCode::CREATED, Json(OrderResponse::from_order(&order)))),
        Err(err) => Err(map_application_error(err)),
    }
}

// 注文取得エンドポイント
// 処理結果の確認（`processed`/`success`）にも使う
async fn get_order_by_id(
    State(state): State<AppState>,
    Path(order_id): Path<u64>,
) -> Result<Json<OrderResponse>, (StatusCode, Json<ApiError>)> {
    match state
        .order_service
        .get_order_by_id(OrderId::new(order_id))
        .await
    {
        Ok(Some(order)) => Ok(Json(OrderResponse::from_order(&order))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: format!("Order {} not found", order_id),
                code: "ORDER_NOT_FOUND".to_string(),
            }),
        )),
        Err(err) => Err(map_application_error(err)),
    }
}

// アプリケーションエラーをHTTPエラーにマッピング
fn map_application_error(err: ApplicationError) -> (StatusCode, Json<ApiError>) {
    match err {
        ApplicationError::DomainError(domain_err) => map_domain_error(domain_err),
        ApplicationError::RepositoryError(RepositoryError::NotFound(msg)) => (
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: msg,
                code: "ORDER_NOT_FOUND".to_string(),
            }),
        ),
        ApplicationError::RepositoryError(repo_err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError {
                error: format!("{}", repo_err),
                code: "REPOSITORY_ERROR".to_string(),
            }),
        ),
        ApplicationError::NotFound(msg) => (
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: msg,
                code: "NOT_FOUND".to_string(),
            }),
        ),
    }
}

// ドメインエラーを適切なHTTPステータスコードとエラーコードにマッピング
fn map_domain_error(domain_err: DomainError) -> (StatusCode, Json<ApiError>) {
    match domain_err {
        DomainError::InvalidRequest(msg) => (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: msg,
                code: "INVALID_REQUEST".to_string(),
            }),
        ),
        DomainError::Unavailable => (
            StatusCode::CONFLICT,
            Json(ApiError {
                error: format!("{}", DomainError::Unavailable),
                code: "ROOM_UNAVAILABLE".to_string(),
            }),
        ),
        DomainError::SlotNotFound(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError {
                error: format!("No availability data found: {}", msg),
                code: "SLOT_NOT_FOUND".to_string(),
            }),
        ),
    }
}
