//! # Core API ライブラリ
//!
//! Parent リソースの CRUD API を構成するモジュールを公開する。
//! `main.rs` と結合テストはここからルーターを組み立てる。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod usecase;
