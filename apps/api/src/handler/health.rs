//! # ヘルスチェックハンドラ
//!
//! `GET /api/health` — Liveness Check。
//! スプレッドシートへの到達性には依存せず、プロセスが生きていれば常に 200 を返す。

use axum::Json;
use fitlog_shared::HealthResponse;

/// ヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
