//! # API サーバー設定
//!
//! 環境変数からサーバーとスプレッドシート接続の設定を読み込む。
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `FITLOG_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `FITLOG_PORT` | **Yes** | ポート番号 |
//! | `GOOGLE_CREDENTIALS_FILE` | **Yes** | サービスアカウント鍵ファイルのパス |
//! | `SPREADSHEET_ID` | **Yes** | スプレッドシート ID |
//! | `WORKSHEET_NAME` | No | ワークシート名（デフォルト: `Workouts`） |
//!
//! ログ関連は `RUST_LOG` / `LOG_FORMAT`（shared の observability 参照）。

use std::env;

/// API サーバーの設定
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// サービスアカウント鍵ファイルのパス
    pub credentials_file: String,
    /// スプレッドシート ID
    pub spreadsheet_id: String,
    /// ワークシート名
    pub worksheet_name: String,
}

/// ワークシート名のデフォルト
const DEFAULT_WORKSHEET_NAME: &str = "Workouts";

impl ApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            host: env::var("FITLOG_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("FITLOG_PORT")
                .expect("FITLOG_PORT が設定されていません")
                .parse()
                .expect("FITLOG_PORT は有効なポート番号である必要があります"),
            credentials_file: env::var("GOOGLE_CREDENTIALS_FILE")
                .expect("GOOGLE_CREDENTIALS_FILE が設定されていません"),
            spreadsheet_id: env::var("SPREADSHEET_ID")
                .expect("SPREADSHEET_ID が設定されていません"),
            worksheet_name: env::var("WORKSHEET_NAME")
                .unwrap_or_else(|_| DEFAULT_WORKSHEET_NAME.to_string()),
        })
    }
}
