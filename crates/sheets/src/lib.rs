//! # Google Sheets インフラ層
//!
//! スプレッドシートを記録の保存先として扱うためのクレート。
//! Google Sheets REST API v4 をサービスアカウント認証で呼び出す。
//!
//! ## モジュール構成
//!
//! - `credentials`: サービスアカウント鍵ファイルの読み込み
//! - `auth`: JWT Bearer assertion によるアクセストークン取得
//! - `client`: Sheets REST API の薄いクライアント
//! - `error`: エラー型（セッション解決の失敗と操作の失敗を区別する）
//! - `store`: [`WorkoutStore`] トレイトとスプレッドシート実装
//!
//! ## セッションモデル
//!
//! リクエストごとに資格情報の読み込み・トークン取得・スプレッドシートの
//! オープンをやり直す。接続プールもトークンキャッシュもない。

pub mod auth;
pub mod client;
pub mod credentials;
pub mod error;
pub mod store;

pub use credentials::ServiceAccountKey;
pub use error::{SheetsError, StoreError};
pub use store::{SheetsConfig, SheetsWorkoutStore, WorkoutStore};
