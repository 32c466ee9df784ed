//! # エラーレスポンスボディ
//!
//! 全エンドポイント共通の失敗時ワイヤ形式 `{ "error": "<詳細>" }` を提供する。
//!
//! ## 設計
//!
//! - `ErrorBody` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は api クレートの責務（shared に axum 依存を入れない）
//! - 接続エラーなど定型メッセージは便利コンストラクタで提供し、文字列の散在を防ぐ

use serde::{Deserialize, Serialize};

/// 失敗時の JSON レスポンスボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    /// 汎用コンストラクタ
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// スプレッドシートへの接続失敗（HTTP 500、固定メッセージ）
    pub fn connection() -> Self {
        Self::new("Could not connect to Google Sheets")
    }

    /// 削除対象が存在しない（HTTP 404、固定メッセージ）
    pub fn workout_not_found() -> Self {
        Self::new("Workout not found")
    }
}
