//! # ParentApi インフラ層
//!
//! 外部システム（PostgreSQL）との接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理とマイグレーション
//! - **リポジトリ実装**: [`repository::ParentRepository`] の PostgreSQL / インメモリ実装
//!
//! ## 依存関係
//!
//! ```text
//! core-api → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリトレイトと実装

pub mod db;
pub mod error;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
