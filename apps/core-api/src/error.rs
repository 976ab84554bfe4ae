//! # Core API エラー定義
//!
//! Core API 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! レスポンスボディは RFC 9457 Problem Details（[`ErrorResponse`]）。
//! 500 系の詳細はログにのみ出力し、クライアントには固定メッセージを返す。

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use parentapi_domain::parent::ParentId;
use parentapi_infra::{InfraError, InfraErrorKind};
use parentapi_shared::{ErrorResponse, event_log::error as log_error};
use thiserror::Error;

/// Core API で発生するエラー
#[derive(Debug, Error)]
pub enum CoreError {
   /// 指定 ID の Parent が存在しない
   #[error("ID : {0}")]
   ParentNotFound(ParentId),

   /// リクエストボディを解釈できない
   #[error("不正なリクエスト: {0}")]
   BadRequest(String),

   /// 入力値の検証エラー
   #[error("バリデーションエラー: {0}")]
   Validation(String),

   /// データベースエラー
   #[error("データベースエラー: {0}")]
   Database(#[from] InfraError),
}

impl IntoResponse for CoreError {
   fn into_response(self) -> Response {
      let body = match &self {
         CoreError::ParentNotFound(_) => ErrorResponse::not_found(self.to_string()),
         CoreError::BadRequest(msg) => ErrorResponse::bad_request(msg.clone()),
         CoreError::Validation(msg) => ErrorResponse::validation_error(msg.clone()),
         CoreError::Database(e) => {
            let kind = match e.kind() {
               InfraErrorKind::Database(_) => log_error::kind::DATABASE,
               InfraErrorKind::Unexpected(_) => log_error::kind::INTERNAL,
            };
            tracing::error!(
               error.category = log_error::category::INFRASTRUCTURE,
               error.kind = kind,
               span_trace = %e.span_trace(),
               "データベースエラー: {}",
               e
            );
            ErrorResponse::internal_error()
         }
      };

      let status =
         StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
      (status, Json(body)).into_response()
   }
}

#[cfg(test)]
mod tests {
   use axum::body::to_bytes;
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   async fn into_parts(error: CoreError) -> (StatusCode, ErrorResponse) {
      let response = error.into_response();
      let status = response.status();
      let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
      (status, serde_json::from_slice(&bytes).unwrap())
   }

   #[tokio::test]
   async fn test_parent_not_foundはid付きのdetailで404() {
      let (status, body) = into_parts(CoreError::ParentNotFound(ParentId::new(8))).await;

      assert_eq!(status, StatusCode::NOT_FOUND);
      assert_eq!(body, ErrorResponse::not_found("ID : 8"));
   }

   #[rstest]
   #[case::bad_request(CoreError::BadRequest("壊れた JSON".to_string()), ErrorResponse::bad_request("壊れた JSON"))]
   #[case::validation(CoreError::Validation("name: length".to_string()), ErrorResponse::validation_error("name: length"))]
   #[tokio::test]
   async fn test_入力エラーは400(#[case] error: CoreError, #[case] expected: ErrorResponse) {
      let (status, body) = into_parts(error).await;

      assert_eq!(status, StatusCode::BAD_REQUEST);
      assert_eq!(body, expected);
   }

   #[tokio::test]
   async fn test_データベースエラーは詳細を隠して500() {
      let error = CoreError::from(InfraError::unexpected("接続が切れました"));

      let (status, body) = into_parts(error).await;

      assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
      assert_eq!(body, ErrorResponse::internal_error());
   }
}
