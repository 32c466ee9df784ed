//! # Fitlog API サーバー
//!
//! ワークアウト記録の CRUD を Google Sheets に中継する HTTP サーバー。
//!
//! ## エンドポイント
//!
//! | メソッド | パス | 説明 |
//! |----------|------|------|
//! | GET | `/api/health` | ヘルスチェック（シート到達性に非依存） |
//! | POST | `/api/workouts` | 記録の作成 |
//! | GET | `/api/workouts` | 記録の一覧（新しい順） |
//! | DELETE | `/api/workouts/{id}` | 記録の削除 |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p fitlog-api
//!
//! # 本番環境（環境変数を直接指定）
//! FITLOG_PORT=8000 GOOGLE_CREDENTIALS_FILE=... SPREADSHEET_ID=... cargo run -p fitlog-api --release
//! ```
//!
//! 環境変数の一覧は [`config`](fitlog_api::config) を参照。

use std::{net::SocketAddr, sync::Arc};

use fitlog_api::{app_builder::build_app, config::ApiConfig, handler::WorkoutState};
use fitlog_domain::SystemClock;
use fitlog_sheets::{SheetsConfig, SheetsWorkoutStore};
use fitlog_shared::observability::TracingConfig;
use tokio::net::TcpListener;

/// API サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. ワークシートのプロビジョニング（冪等）
/// 5. ルーターの構築と HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    // 本番環境では .env ファイルは使用せず、環境変数を直接設定する
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("api");
    fitlog_shared::observability::init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "api").entered();

    // 設定読み込み
    let config = ApiConfig::from_env().expect("設定の読み込みに失敗しました");

    tracing::info!(
        "API サーバーを起動します: {}:{} (spreadsheet: {})",
        config.host,
        config.port,
        config.spreadsheet_id
    );

    // ストア初期化
    let sheets_config = SheetsConfig::new(
        config.credentials_file.clone(),
        config.spreadsheet_id.clone(),
        config.worksheet_name.clone(),
    );
    let store = SheetsWorkoutStore::new(sheets_config);

    // ワークシートのプロビジョニング（冪等）
    // リクエスト経路には作成の副作用を持たせず、起動時に 1 回だけ行う。
    // 失敗してもサーバーは起動する（シート側が回復するまで各リクエストは
    // 接続エラーを返す）。
    if let Err(e) = store.ensure_worksheet().await {
        tracing::warn!("ワークシートのプロビジョニングに失敗しました: {e}");
    }

    let state = Arc::new(WorkoutState {
        store,
        clock: Arc::new(SystemClock),
    });
    let app = build_app(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("API サーバーが起動しました: {}", addr);

    // Graceful shutdown は axum::serve が自動的に処理する
    axum::serve(listener, app).await?;

    Ok(())
}
