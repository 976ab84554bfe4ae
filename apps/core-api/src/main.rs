//! # Core API サーバー
//!
//! Parent リソースの CRUD API を提供する HTTP サーバー。
//!
//! ## 役割
//!
//! - **HTTP 境界**: `/api/1.0/parents` 配下の JSON API
//! - **データ永続化**: PostgreSQL（またはインメモリ）への保存
//! - **運用**: `/health` と `/health/ready` による死活監視
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
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト） |
//!
//! ## 起動方法
//!
//! ```bash
//! # DB なしで起動
//! CORE_PORT=13001 STORAGE_BACKEND=memory cargo run -p parentapi-core-api
//!
//! # 本番環境
//! CORE_PORT=13001 DATABASE_URL=postgres://... LOG_FORMAT=json cargo run -p parentapi-core-api --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use parentapi_core_api::{
   app_builder::build_app,
   config::{CoreConfig, StorageBackend},
   handler::{ParentState, ReadinessState},
   usecase::{ParentService, ParentServiceImpl},
};
use parentapi_infra::{
   db,
   repository::{InMemoryParentRepository, ParentRepository, PostgresParentRepository},
};
use parentapi_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Core API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   init_tracing(TracingConfig::from_env("core-api"));

   let config = CoreConfig::from_env().context("設定の読み込みに失敗しました")?;

   tracing::info!(
      "Core API サーバーを起動します: {}:{}",
      config.host,
      config.port
   );

   let repository = build_repository(&config.storage).await?;

   let service: Arc<dyn ParentService> = Arc::new(ParentServiceImpl::new(repository.clone()));
   let app = build_app(
      Arc::new(ParentState { service }),
      Arc::new(ReadinessState { repository }),
   );

   let addr: SocketAddr = format!("{}:{}", config.host, config.port)
      .parse()
      .context("アドレスのパースに失敗しました")?;

   let listener = TcpListener::bind(addr).await?;
   tracing::info!("Core API サーバーが起動しました: {}", addr);

   axum::serve(listener, app)
      .with_graceful_shutdown(shutdown_signal())
      .await?;

   tracing::info!("Core API サーバーを停止しました");
   Ok(())
}

/// 設定に応じたリポジトリ実装を初期化する
async fn build_repository(storage: &StorageBackend) -> anyhow::Result<Arc<dyn ParentRepository>> {
   match storage {
      StorageBackend::Postgres {
         database_url,
         max_connections,
      } => {
         let pool = db::create_pool(database_url, *max_connections)
            .await
            .context("データベース接続に失敗しました")?;
         tracing::info!("データベースに接続しました");

         db::run_migrations(&pool)
            .await
            .context("マイグレーションに失敗しました")?;

         Ok(Arc::new(PostgresParentRepository::new(pool)))
      }
      StorageBackend::Memory => {
         tracing::warn!("インメモリストアで起動します（再起動でデータは失われます）");
         Ok(Arc::new(InMemoryParentRepository::new()))
      }
   }
}

/// Ctrl+C または SIGTERM を待つ
async fn shutdown_signal() {
   let ctrl_c = async {
      if let Err(e) = tokio::signal::ctrl_c().await {
         tracing::error!(error = %e, "Ctrl+C ハンドラの登録に失敗しました");
         std::future::pending::<()>().await;
      }
   };

   #[cfg(unix)]
   let terminate = async {
      match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
         Ok(mut signal) => {
            signal.recv().await;
         }
         Err(e) => {
            tracing::error!(error = %e, "SIGTERM ハンドラの登録に失敗しました");
            std::future::pending::<()>().await;
         }
      }
   };

   #[cfg(not(unix))]
   let terminate = std::future::pending::<()>();

   tokio::select! {
      () = ctrl_c => {},
      () = terminate => {},
   }

   tracing::info!("シャットダウンを開始します");
}
