//! # ParentRepository
//!
//! Parent の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **ID 採番は DB**: `parent_id` は SERIAL。`INSERT ... RETURNING` で採番結果を受け取る
//! - **属性は JSONB**: `name` 以外のフィールドは `attributes` 列にそのまま保存する
//! - **存在確認は呼び出し側**: `update` / `delete` は対象行の有無を戻り値で返すのみ

use async_trait::async_trait;
use parentapi_domain::parent::{Parent, ParentDraft, ParentId};
use serde_json::{Map, Value};
use sqlx::{PgPool, types::Json};

use crate::error::InfraError;

/// Parent リポジトリトレイト
#[async_trait]
pub trait ParentRepository: Send + Sync {
    /// 全件を ID 昇順で取得する
    async fn find_all(&self) -> Result<Vec<Parent>, InfraError>;

    /// ID で検索する
    async fn find_by_id(&self, id: ParentId) -> Result<Option<Parent>, InfraError>;

    /// 新しい Parent を挿入し、採番済みのエンティティを返す
    async fn insert(&self, draft: &ParentDraft) -> Result<Parent, InfraError>;

    /// 指定 ID の内容を全置換する
    ///
    /// 対象が存在しない場合は `None` を返す。
    async fn update(&self, id: ParentId, draft: &ParentDraft)
    -> Result<Option<Parent>, InfraError>;

    /// 指定 ID を削除する
    ///
    /// 削除した行があれば `true`。
    async fn delete(&self, id: ParentId) -> Result<bool, InfraError>;

    /// ストアへの疎通確認（Readiness Check 用）
    async fn ping(&self) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の ParentRepository
#[derive(Debug, Clone)]
pub struct PostgresParentRepository {
    pool: PgPool,
}

impl PostgresParentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// `parents` テーブルの行
#[derive(sqlx::FromRow)]
struct ParentRow {
    parent_id:  i32,
    name:       String,
    attributes: Json<Map<String, Value>>,
}

impl From<ParentRow> for Parent {
    fn from(row: ParentRow) -> Self {
        Parent::new(
            ParentId::new(row.parent_id),
            ParentDraft::new(row.name, row.attributes.0),
        )
    }
}

#[async_trait]
impl ParentRepository for PostgresParentRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Parent>, InfraError> {
        let rows = sqlx::query_as::<_, ParentRow>(
            r#"
            SELECT parent_id, name, attributes
            FROM parents
            ORDER BY parent_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Parent::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: ParentId) -> Result<Option<Parent>, InfraError> {
        let row = sqlx::query_as::<_, ParentRow>(
            r#"
            SELECT parent_id, name, attributes
            FROM parents
            WHERE parent_id = $1
            "#,
        )
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Parent::from))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, draft: &ParentDraft) -> Result<Parent, InfraError> {
        let row = sqlx::query_as::<_, ParentRow>(
            r#"
            INSERT INTO parents (name, attributes)
            VALUES ($1, $2)
            RETURNING parent_id, name, attributes
            "#,
        )
        .bind(draft.name())
        .bind(Json(draft.attributes().clone()))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update(
        &self,
        id: ParentId,
        draft: &ParentDraft,
    ) -> Result<Option<Parent>, InfraError> {
        let row = sqlx::query_as::<_, ParentRow>(
            r#"
            UPDATE parents
            SET name = $2, attributes = $3
            WHERE parent_id = $1
            RETURNING parent_id, name, attributes
            "#,
        )
        .bind(id.as_i32())
        .bind(draft.name())
        .bind(Json(draft.attributes().clone()))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Parent::from))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: ParentId) -> Result<bool, InfraError> {
        let result = sqlx::query(
            r#"
            DELETE FROM parents
            WHERE parent_id = $1
            "#,
        )
        .bind(id.as_i32())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), InfraError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
