//! # Core API アプリケーション構築
//!
//! State を受け取り、ルーターとミドルウェアを組み立てる。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{Router, routing::get};
use parentapi_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
   request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
   trace::TraceLayer,
};

use crate::handler::{
   ParentState,
   ReadinessState,
   create_parent,
   delete_parent,
   get_parent,
   health_check,
   list_parents,
   readiness_check,
   update_parent,
};

/// Parent リソースのベースパス
pub const PARENTS_PATH: &str = "/api/1.0/parents";

/// ルーターを構築する
///
/// ミドルウェアは外側から順に:
/// 1. `SetRequestIdLayer`: `x-request-id` がなければ UUID v7 を採番
/// 2. `TraceLayer`: Request ID 付きのリクエストスパン
/// 3. `PropagateRequestIdLayer`: レスポンスに `x-request-id` を複写
pub fn build_app(parent_state: Arc<ParentState>, readiness_state: Arc<ReadinessState>) -> Router {
   Router::new()
      .route("/health", get(health_check))
      .route("/health/ready", get(readiness_check))
      .with_state(readiness_state)
      .route(PARENTS_PATH, get(list_parents).post(create_parent))
      .route(
         &format!("{PARENTS_PATH}/{{parent_id}}"),
         get(get_parent).put(update_parent).delete(delete_parent),
      )
      .with_state(parent_state)
      .layer(PropagateRequestIdLayer::x_request_id())
      .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
      .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
