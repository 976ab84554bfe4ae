//! # Parent ハンドラ
//!
//! Parent リソースの CRUD API を提供する。
//!
//! ## エンドポイント
//!
//! - `GET /api/1.0/parents` - 全件取得
//! - `GET /api/1.0/parents/{parent_id}` - 1 件取得
//! - `POST /api/1.0/parents` - 登録（201 + `Location`）
//! - `PUT /api/1.0/parents/{parent_id}` - 全置換
//! - `DELETE /api/1.0/parents/{parent_id}` - 削除
//!
//! ## JSON 形状
//!
//! ```json
//! { "parentId": 1, "name": "山田", "age": 40 }
//! ```
//!
//! `parentId` / `name` 以外のフィールドはそのまま保存・返却される。

use std::sync::Arc;

use axum::{
   Json,
   extract::{OriginalUri, Path, State},
   http::{StatusCode, Uri, header},
   response::IntoResponse,
};
use parentapi_domain::parent::{Parent, ParentDraft, ParentId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::{
   error::CoreError,
   extract::ValidatedJson,
   usecase::ParentService,
};

/// Parent API の共有状態
pub struct ParentState {
   pub service: Arc<dyn ParentService>,
}

// --- リクエスト/レスポンス型 ---

/// Parent 登録・更新リクエスト
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ParentRequest {
   /// 受け取るが使用しない（登録時は採番、更新時はパスの ID が優先）
   #[serde(default)]
   pub parent_id:  Option<Value>,
   #[validate(length(min = 1, max = 100))]
   pub name:       String,
   #[serde(flatten)]
   pub attributes: Map<String, Value>,
}

impl From<ParentRequest> for ParentDraft {
   fn from(req: ParentRequest) -> Self {
      ParentDraft::new(req.name, req.attributes)
   }
}

/// Parent DTO
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentDto {
   pub parent_id:  ParentId,
   pub name:       String,
   #[serde(flatten)]
   pub attributes: Map<String, Value>,
}

impl From<Parent> for ParentDto {
   fn from(parent: Parent) -> Self {
      Self {
         parent_id:  parent.id(),
         name:       parent.name().to_string(),
         attributes: parent.attributes().clone(),
      }
   }
}

// --- ハンドラ ---

/// GET /api/1.0/parents
pub async fn list_parents(
   State(state): State<Arc<ParentState>>,
) -> Result<impl IntoResponse, CoreError> {
   let parents = state.service.get_all().await?;

   let items: Vec<ParentDto> = parents.into_iter().map(ParentDto::from).collect();
   Ok((StatusCode::OK, Json(items)))
}

/// GET /api/1.0/parents/{parent_id}
///
/// 存在しない場合は 404（detail: `ID : {parent_id}`）。
pub async fn get_parent(
   State(state): State<Arc<ParentState>>,
   Path(parent_id): Path<i32>,
) -> Result<impl IntoResponse, CoreError> {
   let parent_id = ParentId::new(parent_id);

   let parent = state
      .service
      .get(parent_id)
      .await?
      .ok_or(CoreError::ParentNotFound(parent_id))?;

   Ok((StatusCode::OK, Json(ParentDto::from(parent))))
}

/// POST /api/1.0/parents
///
/// ## レスポンス
///
/// - `201 Created`: ボディなし。`Location` に作成したリソースのパス
/// - `400 Bad Request`: JSON 不正、`name` が空または 100 文字超
#[tracing::instrument(skip_all)]
pub async fn create_parent(
   State(state): State<Arc<ParentState>>,
   OriginalUri(uri): OriginalUri,
   ValidatedJson(req): ValidatedJson<ParentRequest>,
) -> Result<impl IntoResponse, CoreError> {
   tracing::info!("新しい Parent を登録します");

   let parent = state.service.post(req.into()).await?;

   Ok((
      StatusCode::CREATED,
      [(header::LOCATION, created_location(&uri, parent.id()))],
   ))
}

/// PUT /api/1.0/parents/{parent_id}
///
/// ボディの `parentId` は無視し、パスの ID の Parent を全置換する。
///
/// ## レスポンス
///
/// - `200 OK`: 更新後の Parent
/// - `400 Bad Request`: 登録時と同じ検証エラー
/// - `404 Not Found`: 対象が存在しない
pub async fn update_parent(
   State(state): State<Arc<ParentState>>,
   Path(parent_id): Path<i32>,
   ValidatedJson(req): ValidatedJson<ParentRequest>,
) -> Result<impl IntoResponse, CoreError> {
   let parent = state
      .service
      .put(req.into(), ParentId::new(parent_id))
      .await?;

   Ok((StatusCode::OK, Json(ParentDto::from(parent))))
}

/// DELETE /api/1.0/parents/{parent_id}
///
/// 存在しない ID でも 200 を返す。
pub async fn delete_parent(
   State(state): State<Arc<ParentState>>,
   Path(parent_id): Path<i32>,
) -> Result<impl IntoResponse, CoreError> {
   state.service.delete(ParentId::new(parent_id)).await?;

   Ok(StatusCode::OK)
}

/// リクエストパスに採番 ID を連結して `Location` を組み立てる
fn created_location(uri: &Uri, id: ParentId) -> String {
   format!("{}/{}", uri.path().trim_end_matches('/'), id)
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;
   use serde_json::json;

   use super::*;

   #[rstest]
   #[case::通常("/api/1.0/parents", "/api/1.0/parents/3")]
   #[case::末尾スラッシュ("/api/1.0/parents/", "/api/1.0/parents/3")]
   #[case::クエリは含めない("/api/1.0/parents?x=1", "/api/1.0/parents/3")]
   fn test_created_locationはパスに採番idを連結する(#[case] uri: &str, #[case] expected: &str) {
      let uri: Uri = uri.parse().unwrap();

      assert_eq!(created_location(&uri, ParentId::new(3)), expected);
   }

   #[test]
   fn test_リクエストのparent_idとnameは属性に残らない() {
      let req: ParentRequest = serde_json::from_value(json!({
         "parentId": 99,
         "name": "A",
         "age": 40
      }))
      .unwrap();

      let draft = ParentDraft::from(req);

      assert_eq!(draft.name(), "A");
      assert_eq!(
         Value::Object(draft.attributes().clone()),
         json!({ "age": 40 })
      );
   }

   #[test]
   fn test_dtoは属性をフラットに展開する() {
      let parent = Parent::new(
         ParentId::new(1),
         ParentDraft::new("A", json!({ "age": 40 }).as_object().cloned().unwrap()),
      );

      let value = serde_json::to_value(ParentDto::from(parent)).unwrap();

      assert_eq!(value, json!({ "parentId": 1, "name": "A", "age": 40 }));
   }

   #[rstest]
   #[case::空文字(String::new())]
   #[case::長すぎる("a".repeat(101))]
   fn test_nameの長さが範囲外なら検証エラー(#[case] name: String) {
      let req: ParentRequest = serde_json::from_value(json!({ "name": name })).unwrap();

      assert!(req.validate().is_err());
   }

   #[test]
   fn test_nameが100文字なら検証を通る() {
      let req: ParentRequest =
         serde_json::from_value(json!({ "name": "a".repeat(100) })).unwrap();

      assert!(req.validate().is_ok());
   }
}
