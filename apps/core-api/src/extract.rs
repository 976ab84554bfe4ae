//! # リクエストボディ抽出
//!
//! axum の `Json` 抽出の失敗を [`CoreError`] に揃えるためのエクストラクタ。
//!
//! - [`JsonBody`]: デシリアライズのみ
//! - [`ValidatedJson`]: デシリアライズ後に `validator` の検証を行う

use axum::{
   Json,
   extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::CoreError;

/// JSON ボディ（失敗時は 400 Bad Request）
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
   T: DeserializeOwned,
   S: Send + Sync,
{
   type Rejection = CoreError;

   async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
      let Json(value) = Json::<T>::from_request(req, state)
         .await
         .map_err(|rejection| CoreError::BadRequest(rejection.body_text()))?;
      Ok(Self(value))
   }
}

/// 検証済み JSON ボディ（検証失敗時も 400）
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
   T: DeserializeOwned + Validate,
   S: Send + Sync,
{
   type Rejection = CoreError;

   async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
      let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;
      value
         .validate()
         .map_err(|e| CoreError::Validation(e.to_string()))?;
      Ok(Self(value))
   }
}
