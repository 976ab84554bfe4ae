//! # Parent
//!
//! 本サービスが扱う唯一のエンティティ。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`ParentId`] | Parent ID | サーバーが採番する整数 ID。作成後は不変 |
//! | [`ParentDraft`] | 下書き | ID を持たない Parent の内容（作成・置換の入力） |
//! | [`Parent`] | Parent | ID が確定した永続化済みエンティティ |
//!
//! ## 設計方針
//!
//! - **ID はサーバー採番**: クライアントが送った `parentId` はドメインに届かない。
//!   [`ParentDraft`] は ID を持たないため、型で保証される
//! - **不透明な属性**: `name` 以外のフィールドは JSON オブジェクトとしてそのまま保持する

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `attributes` に含めてはならないキー（専用フィールドと衝突するため）
const RESERVED_KEYS: [&str; 2] = ["parentId", "name"];

/// Parent ID（一意識別子）
#[derive(
   Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
#[serde(transparent)]
#[display("{_0}")]
pub struct ParentId(i32);

impl ParentId {
   pub fn new(value: i32) -> Self {
      Self(value)
   }

   pub fn as_i32(&self) -> i32 {
      self.0
   }
}

/// ID を持たない Parent の内容
///
/// 作成時と全置換更新時の入力として使用する。
///
/// # 不変条件
///
/// - `attributes` は `parentId` / `name` キーを含まない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentDraft {
   name:       String,
   attributes: Map<String, Value>,
}

impl ParentDraft {
   /// 下書きを作成する
   ///
   /// `attributes` に予約キーが含まれていた場合は取り除く。
   pub fn new(name: impl Into<String>, mut attributes: Map<String, Value>) -> Self {
      for key in RESERVED_KEYS {
         attributes.remove(key);
      }
      Self {
         name: name.into(),
         attributes,
      }
   }

   pub fn name(&self) -> &str {
      &self.name
   }

   pub fn attributes(&self) -> &Map<String, Value> {
      &self.attributes
   }
}

/// Parent エンティティ
///
/// # 不変条件
///
/// - `id` は常に存在する（検索・作成・更新の結果として返る Parent は必ず ID を持つ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parent {
   id:    ParentId,
   draft: ParentDraft,
}

impl Parent {
   /// 採番済みの ID と内容から Parent を組み立てる
   pub fn new(id: ParentId, draft: ParentDraft) -> Self {
      Self { id, draft }
   }

   pub fn id(&self) -> ParentId {
      self.id
   }

   pub fn name(&self) -> &str {
      self.draft.name()
   }

   pub fn attributes(&self) -> &Map<String, Value> {
      self.draft.attributes()
   }

   /// 内容を全置換する（ID は維持）
   pub fn replaced_with(self, draft: ParentDraft) -> Self {
      Self { draft, ..self }
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;
   use serde_json::json;

   use super::*;

   fn attributes(value: Value) -> Map<String, Value> {
      value.as_object().cloned().unwrap()
   }

   #[rstest]
   #[case::parent_id("parentId")]
   #[case::name("name")]
   fn test_draft_は予約キーをattributesから取り除く(#[case] key: &str) {
      let mut attrs = attributes(json!({ "age": 40 }));
      attrs.insert(key.to_string(), json!("x"));

      let draft = ParentDraft::new("A", attrs);

      assert!(!draft.attributes().contains_key(key));
      assert_eq!(draft.attributes().get("age"), Some(&json!(40)));
   }

   #[test]
   fn test_draft_は予約キー以外をそのまま保持する() {
      let attrs = attributes(json!({ "age": 40, "tags": ["a", "b"], "meta": { "k": null } }));

      let draft = ParentDraft::new("A", attrs.clone());

      assert_eq!(draft.attributes(), &attrs);
   }

   #[test]
   fn test_replaced_with_はidを維持して内容を置き換える() {
      let parent = Parent::new(ParentId::new(7), ParentDraft::new("A", Map::new()));

      let replaced = parent.replaced_with(ParentDraft::new("B", attributes(json!({ "x": 1 }))));

      assert_eq!(replaced.id(), ParentId::new(7));
      assert_eq!(replaced.name(), "B");
      assert_eq!(replaced.attributes().get("x"), Some(&json!(1)));
   }

   #[test]
   fn test_parent_idのdisplayは整数表記() {
      assert_eq!(ParentId::new(42).to_string(), "42");
   }

   #[test]
   fn test_parent_idはjsonで整数としてシリアライズされる() {
      assert_eq!(serde_json::to_value(ParentId::new(9)).unwrap(), json!(9));
   }
}
