//! # ParentApi ドメイン層
//!
//! Parent リソースのドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! core-api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB）や HTTP には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`parent`] - Parent エンティティと識別子
//!
//! ## 使用例
//!
//! ```rust
//! use parentapi_domain::parent::{Parent, ParentDraft, ParentId};
//!
//! let draft = ParentDraft::new("A", serde_json::Map::new());
//! let parent = Parent::new(ParentId::new(7), draft);
//!
//! assert_eq!(parent.id().as_i32(), 7);
//! assert_eq!(parent.name(), "A");
//! ```

pub mod parent;
