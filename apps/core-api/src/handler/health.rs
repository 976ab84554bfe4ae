//! # ヘルスチェックハンドラ
//!
//! Core API の稼働状態を確認するためのエンドポイント。
//!
//! ## エンドポイント
//!
//! ```text
//! GET /health        - Liveness（プロセスが応答できるか）
//! GET /health/ready  - Readiness（永続化ストアに到達できるか）
//! ```
//!
//! ## レスポンス例
//!
//! ```json
//! { "status": "ready", "checks": { "database": "ok" } }
//! ```

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use parentapi_infra::repository::ParentRepository;
use parentapi_shared::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};

/// ストア疎通確認のタイムアウト
const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Readiness Check の共有状態
pub struct ReadinessState {
   pub repository: Arc<dyn ParentRepository>,
}

/// ヘルスチェックエンドポイント
///
/// サーバーが正常に稼働していることを確認するためのエンドポイント。
pub async fn health_check() -> Json<HealthResponse> {
   Json(HealthResponse {
      status:  "healthy".to_string(),
      version: env!("CARGO_PKG_VERSION").to_string(),
   })
}

/// Readiness Check エンドポイント
///
/// 全チェック OK → 200、1 つでも失敗 → 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
   let mut checks = HashMap::new();
   checks.insert(
      "database".to_string(),
      check_database(state.repository.as_ref()).await,
   );

   let response = ReadinessResponse::from_checks(checks);
   let http_status = match response.status {
      ReadinessStatus::Ready => StatusCode::OK,
      ReadinessStatus::NotReady => StatusCode::SERVICE_UNAVAILABLE,
   };

   (http_status, Json(response))
}

/// リポジトリ経由でストアへの疎通を確認する
async fn check_database(repository: &dyn ParentRepository) -> CheckStatus {
   match tokio::time::timeout(CHECK_TIMEOUT, repository.ping()).await {
      Ok(Ok(())) => CheckStatus::Ok,
      Ok(Err(e)) => {
         tracing::warn!(error = %e, "readiness check: database ping failed");
         CheckStatus::Error
      }
      Err(_) => {
         tracing::warn!("readiness check: database check timed out");
         CheckStatus::Error
      }
   }
}
