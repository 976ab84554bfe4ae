//! # リポジトリ
//!
//! Parent の永続化を担当するリポジトリトレイトと、その実装を提供する。
//!
//! ## 設計方針
//!
//! - **トレイト経由の注入**: ユースケース層は `Arc<dyn ParentRepository>` のみに依存する
//! - **採番はストア側**: `insert` は ID なしの下書きを受け取り、採番済みの Parent を返す
//! - **実装の切り替え**: PostgreSQL 実装とインメモリ実装を設定で選択する

pub mod in_memory_parent_repository;
pub mod parent_repository;

pub use in_memory_parent_repository::InMemoryParentRepository;
pub use parent_repository::{ParentRepository, PostgresParentRepository};
