//! # Core API 設定
//!
//! 環境変数から Core API サーバーの設定を読み込む。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `CORE_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `CORE_PORT` | **Yes** | ポート番号 |
//! | `STORAGE_BACKEND` | No | `postgres`（デフォルト）または `memory` |
//! | `DATABASE_URL` | postgres 時 | PostgreSQL 接続 URL |
//! | `DATABASE_MAX_CONNECTIONS` | No | 接続プールの最大数（デフォルト: 10） |

use std::env;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
   /// 必須の環境変数が未設定
   #[error("環境変数 {0} が設定されていません")]
   Missing(&'static str),

   /// 値の形式が不正
   #[error("環境変数 {name} の値が不正です: {value:?}")]
   Invalid { name: &'static str, value: String },
}

/// 永続化ストアの種別
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
   /// PostgreSQL
   Postgres {
      database_url:    String,
      max_connections: u32,
   },
   /// プロセス内メモリ（再起動で消える）
   Memory,
}

/// Core API サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
   /// バインドアドレス
   pub host:    String,
   /// ポート番号
   pub port:    u16,
   /// 永続化ストア
   pub storage: StorageBackend,
}

impl CoreConfig {
   /// 環境変数から設定を読み込む
   pub fn from_env() -> Result<Self, ConfigError> {
      Self::from_lookup(|name| env::var(name).ok())
   }

   /// 任意の参照関数から設定を読み込む
   fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
      let host = lookup("CORE_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
      let port = parse_required(&lookup, "CORE_PORT")?;

      let storage = match lookup("STORAGE_BACKEND").as_deref() {
         None | Some("postgres") => StorageBackend::Postgres {
            database_url:    lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            max_connections: parse_optional(&lookup, "DATABASE_MAX_CONNECTIONS")?
               .unwrap_or(DEFAULT_MAX_CONNECTIONS),
         },
         Some("memory") => StorageBackend::Memory,
         Some(other) => {
            return Err(ConfigError::Invalid {
               name:  "STORAGE_BACKEND",
               value: other.to_string(),
            });
         }
      };

      Ok(Self {
         host,
         port,
         storage,
      })
   }
}

fn parse_required<T: std::str::FromStr>(
   lookup: &impl Fn(&str) -> Option<String>,
   name: &'static str,
) -> Result<T, ConfigError> {
   parse_optional(lookup, name)?.ok_or(ConfigError::Missing(name))
}

fn parse_optional<T: std::str::FromStr>(
   lookup: &impl Fn(&str) -> Option<String>,
   name: &'static str,
) -> Result<Option<T>, ConfigError> {
   lookup(name)
      .map(|value| {
         value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value })
      })
      .transpose()
}
