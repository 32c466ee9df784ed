//! # API エラーハンドリング
//!
//! ハンドラ共通のエラー型と、axum レスポンス（`{"error": ...}`）への変換。
//!
//! ## マッピング
//!
//! | エラー | HTTP | ボディ |
//! |--------|------|--------|
//! | 接続失敗（資格情報・トークン・シート解決） | 500 | `{"error":"Could not connect to Google Sheets"}` |
//! | 削除対象なし | 404 | `{"error":"Workout not found"}` |
//! | その他の失敗 | 500 | `{"error":"<エラーテキスト>"}` |
//!
//! リトライもキューイングもしない。すべての失敗はこの境界で
//! JSON レスポンスに変換されて終わる。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fitlog_sheets::StoreError;
use fitlog_shared::ErrorBody;

/// API 層のエラー
#[derive(Debug)]
pub enum ApiError {
    /// スプレッドシートのセッション解決に失敗した
    Connection,
    /// 削除対象のワークアウトが存在しない
    WorkoutNotFound,
    /// その他の失敗（エラーテキストをそのままボディに載せる）
    Unexpected(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Connection(source) => {
                tracing::error!(
                    error.kind = "connection",
                    "スプレッドシートに接続できません: {source}"
                );
                ApiError::Connection
            }
            StoreError::Operation(source) => {
                tracing::error!(error.kind = "operation", "シート操作に失敗しました: {source}");
                ApiError::Unexpected(source.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Connection => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::connection()),
            ),
            ApiError::WorkoutNotFound => {
                (StatusCode::NOT_FOUND, Json(ErrorBody::workout_not_found()))
            }
            ApiError::Unexpected(detail) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::new(detail)))
            }
        }
        .into_response()
    }
}
