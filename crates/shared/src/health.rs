//! # ヘルスチェック共通型
//!
//! `GET /api/health` が返すレスポンス型を提供する。
//! スプレッドシートへの到達性に依存しない Liveness Check 用。

use serde::{Deserialize, Serialize};

/// ヘルスチェックレスポンス
///
/// サーバーが稼働している限り `{"status": "ok", "message": "Server is running"}`
/// を返す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    /// 稼働中レスポンスを作成する
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Server is running".to_string(),
        }
    }
}
