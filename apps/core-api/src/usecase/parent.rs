//! Parent 管理ユースケース

use std::sync::Arc;

use async_trait::async_trait;
use parentapi_domain::parent::{Parent, ParentDraft, ParentId};
use parentapi_infra::repository::ParentRepository;
use parentapi_shared::{event_log::event, log_business_event};

use crate::error::CoreError;

/// Parent 管理のサービス境界
///
/// ハンドラはこのトレイトのみに依存する。
#[async_trait]
pub trait ParentService: Send + Sync {
   /// ID で取得する（存在しなければ `None`）
   async fn get(&self, id: ParentId) -> Result<Option<Parent>, CoreError>;

   /// 全件を取得する
   async fn get_all(&self) -> Result<Vec<Parent>, CoreError>;

   /// 新しい Parent を登録する
   async fn post(&self, draft: ParentDraft) -> Result<Parent, CoreError>;

   /// 指定 ID の Parent を全置換する
   ///
   /// 対象が存在しない場合は [`CoreError::ParentNotFound`]。
   async fn put(&self, draft: ParentDraft, id: ParentId) -> Result<Parent, CoreError>;

   /// 指定 ID の Parent を削除する
   ///
   /// 対象が存在しない場合も成功扱い。
   async fn delete(&self, id: ParentId) -> Result<(), CoreError>;
}

/// リポジトリに委譲する ParentService 実装
pub struct ParentServiceImpl {
   repository: Arc<dyn ParentRepository>,
}

impl ParentServiceImpl {
   pub fn new(repository: Arc<dyn ParentRepository>) -> Self {
      Self { repository }
   }
}

#[async_trait]
impl ParentService for ParentServiceImpl {
   async fn get(&self, id: ParentId) -> Result<Option<Parent>, CoreError> {
      Ok(self.repository.find_by_id(id).await?)
   }

   async fn get_all(&self) -> Result<Vec<Parent>, CoreError> {
      Ok(self.repository.find_all().await?)
   }

   async fn post(&self, draft: ParentDraft) -> Result<Parent, CoreError> {
      let parent = self.repository.insert(&draft).await?;

      log_business_event!(
         event.category = event::category::PARENT,
         event.action = event::action::PARENT_CREATED,
         event.entity_type = event::entity_type::PARENT,
         event.entity_id = %parent.id(),
         event.result = event::result::SUCCESS,
         "Parent 登録"
      );

      Ok(parent)
   }

   async fn put(&self, draft: ParentDraft, id: ParentId) -> Result<Parent, CoreError> {
      let parent = self
         .repository
         .update(id, &draft)
         .await?
         .ok_or(CoreError::ParentNotFound(id))?;

      log_business_event!(
         event.category = event::category::PARENT,
         event.action = event::action::PARENT_UPDATED,
         event.entity_type = event::entity_type::PARENT,
         event.entity_id = %id,
         event.result = event::result::SUCCESS,
         "Parent 更新"
      );

      Ok(parent)
   }

   async fn delete(&self, id: ParentId) -> Result<(), CoreError> {
      if !self.repository.delete(id).await? {
         tracing::debug!(%id, "削除対象の Parent は存在しません");
         return Ok(());
      }

      log_business_event!(
         event.category = event::category::PARENT,
         event.action = event::action::PARENT_DELETED,
         event.entity_type = event::entity_type::PARENT,
         event.entity_id = %id,
         event.result = event::result::SUCCESS,
         "Parent 削除"
      );

      Ok(())
   }
}

#[cfg(test)]
mod tests {
   use parentapi_infra::{InfraError, repository::InMemoryParentRepository};
   use pretty_assertions::assert_eq;
   use serde_json::{Map, json};

   use super::*;

   /// すべての操作が失敗するリポジトリ
   struct FailingParentRepository;

   #[async_trait]
   impl ParentRepository for FailingParentRepository {
      async fn find_all(&self) -> Result<Vec<Parent>, InfraError> {
         Err(InfraError::unexpected("find_all"))
      }

      async fn find_by_id(&self, _id: ParentId) -> Result<Option<Parent>, InfraError> {
         Err(InfraError::unexpected("find_by_id"))
      }

      async fn insert(&self, _draft: &ParentDraft) -> Result<Parent, InfraError> {
         Err(InfraError::unexpected("insert"))
      }

      async fn update(
         &self,
         _id: ParentId,
         _draft: &ParentDraft,
      ) -> Result<Option<Parent>, InfraError> {
         Err(InfraError::unexpected("update"))
      }

      async fn delete(&self, _id: ParentId) -> Result<bool, InfraError> {
         Err(InfraError::unexpected("delete"))
      }

      async fn ping(&self) -> Result<(), InfraError> {
         Err(InfraError::unexpected("ping"))
      }
   }

   fn draft(name: &str) -> ParentDraft {
      ParentDraft::new(name, Map::new())
   }

   fn empty_sut() -> ParentServiceImpl {
      ParentServiceImpl::new(Arc::new(InMemoryParentRepository::new()))
   }

   fn sut_with(parents: impl IntoIterator<Item = Parent>) -> ParentServiceImpl {
      ParentServiceImpl::new(Arc::new(InMemoryParentRepository::with_parents(parents)))
   }

   #[tokio::test]
   async fn test_postで採番されたparentが返る() {
      let sut = empty_sut();
      let attrs = json!({ "age": 40 }).as_object().cloned().unwrap();

      let created = sut.post(ParentDraft::new("A", attrs.clone())).await.unwrap();

      assert_eq!(created.id(), ParentId::new(1));
      assert_eq!(created.name(), "A");
      assert_eq!(created.attributes(), &attrs);
   }

   #[tokio::test]
   async fn test_postの結果をgetで取得できる() {
      let sut = empty_sut();
      let created = sut.post(draft("A")).await.unwrap();

      let found = sut.get(created.id()).await.unwrap();

      assert_eq!(found, Some(created));
   }

   #[tokio::test]
   async fn test_getで存在しないidはnone() {
      let sut = empty_sut();

      assert_eq!(sut.get(ParentId::new(8)).await.unwrap(), None);
   }

   #[tokio::test]
   async fn test_get_allは全件を返す() {
      let sut = sut_with([
         Parent::new(ParentId::new(1), draft("A")),
         Parent::new(ParentId::new(2), draft("B")),
      ]);

      let names: Vec<String> = sut
         .get_all()
         .await
         .unwrap()
         .iter()
         .map(|p| p.name().to_string())
         .collect();

      assert_eq!(names, vec!["A", "B"]);
   }

   #[tokio::test]
   async fn test_putはパスのidで全置換する() {
      let sut = sut_with([Parent::new(
         ParentId::new(7),
         ParentDraft::new("A", json!({ "age": 40 }).as_object().cloned().unwrap()),
      )]);

      let updated = sut.put(draft("B"), ParentId::new(7)).await.unwrap();

      assert_eq!(updated, Parent::new(ParentId::new(7), draft("B")));
      assert_eq!(sut.get(ParentId::new(7)).await.unwrap(), Some(updated));
   }

   #[tokio::test]
   async fn test_putで存在しないidはparent_not_found() {
      let sut = empty_sut();

      let result = sut.put(draft("B"), ParentId::new(8)).await;

      assert!(matches!(
         result,
         Err(CoreError::ParentNotFound(id)) if id == ParentId::new(8)
      ));
      assert!(sut.get_all().await.unwrap().is_empty());
   }

   #[tokio::test]
   async fn test_deleteで取得できなくなる() {
      let sut = sut_with([Parent::new(ParentId::new(1), draft("A"))]);

      sut.delete(ParentId::new(1)).await.unwrap();

      assert_eq!(sut.get(ParentId::new(1)).await.unwrap(), None);
   }

   #[tokio::test]
   async fn test_deleteで存在しないidも成功する() {
      let sut = empty_sut();

      assert!(sut.delete(ParentId::new(8)).await.is_ok());
   }

   #[tokio::test]
   async fn test_リポジトリのエラーはdatabaseエラーになる() {
      let sut = ParentServiceImpl::new(Arc::new(FailingParentRepository));

      assert!(matches!(sut.get_all().await, Err(CoreError::Database(_))));
      assert!(matches!(
         sut.get(ParentId::new(1)).await,
         Err(CoreError::Database(_))
      ));
      assert!(matches!(sut.post(draft("A")).await, Err(CoreError::Database(_))));
      assert!(matches!(
         sut.put(draft("A"), ParentId::new(1)).await,
         Err(CoreError::Database(_))
      ));
      assert!(matches!(
         sut.delete(ParentId::new(1)).await,
         Err(CoreError::Database(_))
      ));
   }
}
