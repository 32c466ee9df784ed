//! # Fitlog API サーバーライブラリ
//!
//! ワークアウト記録 API のコアモジュール。
//!
//! ## モジュール構成
//!
//! - `app_builder`: ルーター構築（State 注入とミドルウェア適用）
//! - `config`: 環境変数からの設定読み込み
//! - `error`: ハンドラ共通のエラー型と JSON レスポンスへの変換
//! - `handler`: HTTP ハンドラ

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
