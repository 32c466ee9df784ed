//! # アプリケーション構築
//!
//! State 注入とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};
use fitlog_sheets::WorkoutStore;
use fitlog_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::handler::{WorkoutState, create_workout, delete_workout, health_check, list_workouts};

/// ルーターを構築する
///
/// Request ID + TraceLayer により、すべての HTTP リクエストに request_id が
/// 付与されログに自動注入される。CORS は permissive
/// （ブラウザのフロントエンドから直接呼ばれる前提のため）。
pub fn build_app<S>(state: Arc<WorkoutState<S>>) -> Router
where
    S: WorkoutStore + 'static,
{
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/workouts", post(create_workout).get(list_workouts))
        .route("/api/workouts/{id}", delete(delete_workout))
        .with_state(state)
        .layer(CorsLayer::permissive())
        // Request ID レイヤー（レイヤー順序が重要: 下に書いたものが外側）
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
