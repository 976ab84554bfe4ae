//! # インメモリ ParentRepository
//!
//! `STORAGE_BACKEND=memory` 時に使用する、プロセス内メモリのみの実装。
//! DB なしでのローカル起動とハンドラ・ユースケースのテストに使う。
//!
//! ID は 1 から単調増加で採番し、削除済みの ID は再利用しない
//! （PostgreSQL の SERIAL と同じ振る舞い）。

use std::collections::BTreeMap;

use async_trait::async_trait;
use parentapi_domain::parent::{Parent, ParentDraft, ParentId};
use tokio::sync::Mutex;

use crate::{error::InfraError, repository::ParentRepository};

#[derive(Debug, Default)]
struct Store {
    parents: BTreeMap<ParentId, Parent>,
    last_id: i32,
}

impl Store {
    fn next_id(&mut self) -> Result<ParentId, InfraError> {
        let next = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| InfraError::unexpected("Parent ID の採番が上限に達しました"))?;
        self.last_id = next;
        Ok(ParentId::new(next))
    }
}

/// インメモリ実装の ParentRepository
#[derive(Debug, Default)]
pub struct InMemoryParentRepository {
    store: Mutex<Store>,
}

impl InMemoryParentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存の Parent で初期化する
    ///
    /// 次に採番される ID は、与えられた ID の最大値 + 1。
    pub fn with_parents(parents: impl IntoIterator<Item = Parent>) -> Self {
        let parents: BTreeMap<ParentId, Parent> = parents.into_iter().map(|p| (p.id(), p)).collect();
        let last_id = parents.keys().next_back().map_or(0, ParentId::as_i32);
        Self {
            store: Mutex::new(Store { parents, last_id }),
        }
    }
}

#[async_trait]
impl ParentRepository for InMemoryParentRepository {
    async fn find_all(&self) -> Result<Vec<Parent>, InfraError> {
        Ok(self.store.lock().await.parents.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ParentId) -> Result<Option<Parent>, InfraError> {
        Ok(self.store.lock().await.parents.get(&id).cloned())
    }

    async fn insert(&self, draft: &ParentDraft) -> Result<Parent, InfraError> {
        let mut store = self.store.lock().await;
        let id = store.next_id()?;
        let parent = Parent::new(id, draft.clone());
        store.parents.insert(id, parent.clone());
        Ok(parent)
    }

    async fn update(
        &self,
        id: ParentId,
        draft: &ParentDraft,
    ) -> Result<Option<Parent>, InfraError> {
        let mut store = self.store.lock().await;
        let Some(current) = store.parents.remove(&id) else {
            return Ok(None);
        };
        let updated = current.replaced_with(draft.clone());
        store.parents.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: ParentId) -> Result<bool, InfraError> {
        Ok(self.store.lock().await.parents.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), InfraError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{Map, json};

    use super::*;

    fn draft(name: &str) -> ParentDraft {
        ParentDraft::new(name, Map::new())
    }

    #[tokio::test]
    async fn test_insert_は1から順に採番する() {
        let sut = InMemoryParentRepository::new();

        let first = sut.insert(&draft("A")).await.unwrap();
        let second = sut.insert(&draft("B")).await.unwrap();

        assert_eq!(first.id(), ParentId::new(1));
        assert_eq!(second.id(), ParentId::new(2));
    }

    #[tokio::test]
    async fn test_with_parents_は既存idの次から採番する() {
        let existing = Parent::new(ParentId::new(7), draft("A"));
        let sut = InMemoryParentRepository::with_parents([existing]);

        let created = sut.insert(&draft("B")).await.unwrap();

        assert_eq!(created.id(), ParentId::new(8));
    }

    #[tokio::test]
    async fn test_削除済みのidは再利用しない() {
        let sut = InMemoryParentRepository::new();
        let first = sut.insert(&draft("A")).await.unwrap();
        sut.delete(first.id()).await.unwrap();

        let second = sut.insert(&draft("B")).await.unwrap();

        assert_eq!(second.id(), ParentId::new(2));
    }

    #[tokio::test]
    async fn test_find_all_はid昇順で返す() {
        let sut = InMemoryParentRepository::with_parents([
            Parent::new(ParentId::new(3), draft("C")),
            Parent::new(ParentId::new(1), draft("A")),
        ]);

        let ids: Vec<i32> = sut
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|p| p.id().as_i32())
            .collect();

        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_find_by_id_は保存した内容をそのまま返す() {
        let sut = InMemoryParentRepository::new();
        let attrs = json!({ "age": 40 }).as_object().cloned().unwrap();
        let created = sut.insert(&ParentDraft::new("A", attrs)).await.unwrap();

        let found = sut.find_by_id(created.id()).await.unwrap();

        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_update_は存在しないidでnoneを返す() {
        let sut = InMemoryParentRepository::new();

        let result = sut.update(ParentId::new(99), &draft("X")).await.unwrap();

        assert_eq!(result, None);
        assert!(sut.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_は内容を全置換しidを維持する() {
        let sut = InMemoryParentRepository::new();
        let attrs = json!({ "age": 40 }).as_object().cloned().unwrap();
        let created = sut.insert(&ParentDraft::new("A", attrs)).await.unwrap();

        let updated = sut
            .update(created.id(), &draft("B"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id(), created.id());
        assert_eq!(updated.name(), "B");
        assert!(updated.attributes().is_empty());
    }

    #[tokio::test]
    async fn test_delete_は存在の有無を返す() {
        let sut = InMemoryParentRepository::new();
        let created = sut.insert(&draft("A")).await.unwrap();

        assert!(sut.delete(created.id()).await.unwrap());
        assert!(!sut.delete(created.id()).await.unwrap());
        assert_eq!(sut.find_by_id(created.id()).await.unwrap(), None);
    }
}
