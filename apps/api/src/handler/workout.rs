//! # ワークアウト API ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /api/workouts` - 記録の作成
//! - `GET /api/workouts` - 記録の一覧（新しい順）
//! - `DELETE /api/workouts/{id}` - 記録の削除
//!
//! すべてのハンドラはリクエストごとにストア側でセッションを解決する。
//! 失敗時のレスポンス形式は [`crate::error::ApiError`] を参照。

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use fitlog_domain::{Clock, Workout};
use fitlog_sheets::WorkoutStore;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::ApiError;

/// ワークアウト API の共有 State
pub struct WorkoutState<S> {
    pub store: S,
    pub clock: Arc<dyn Clock>,
}

// --- リクエスト / レスポンス型 ---

/// 作成リクエストボディ
///
/// 全フィールド省略可。省略時は空文字列 / 0 で補完される。
#[derive(Debug, Deserialize)]
pub struct CreateWorkoutRequest {
    #[serde(rename = "type", default)]
    pub workout_type: String,
    /// JSON の数値をそのまま受ける（`30` も `12.5` も有効）
    #[serde(default = "zero_duration")]
    pub duration: Number,
    #[serde(default)]
    pub intensity: String,
    #[serde(default)]
    pub notes: String,
}

fn zero_duration() -> Number {
    Number::from(0)
}

/// 作成成功レスポンス
#[derive(Debug, Serialize)]
pub struct CreateWorkoutResponse {
    pub success: bool,
    pub message: String,
    pub workout: Workout,
}

/// 一覧レスポンス
#[derive(Debug, Serialize)]
pub struct ListWorkoutsResponse {
    pub success: bool,
    pub count: usize,
    pub workouts: Vec<Workout>,
}

/// 削除成功レスポンス
#[derive(Debug, Serialize)]
pub struct DeleteWorkoutResponse {
    pub success: bool,
    pub message: String,
}

// --- ハンドラ ---

/// POST /api/workouts
///
/// ID とタイムスタンプをサーバー時刻から生成し、シートに 1 行追加する。
/// レスポンスには構築したレコード全体を載せる。
///
/// ボディの解釈失敗（不正な JSON、Content-Type 欠落）もこの境界で
/// [`ApiError`] に変換する。失敗レスポンスは常に `{"error": ...}` の JSON。
pub async fn create_workout<S: WorkoutStore>(
    State(state): State<Arc<WorkoutState<S>>>,
    payload: Result<Json<CreateWorkoutRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload.map_err(|rejection| ApiError::Unexpected(rejection.body_text()))?;

    let workout = Workout::log(
        state.clock.as_ref(),
        req.workout_type,
        req.duration,
        req.intensity,
        req.notes,
    );

    state.store.append(&workout).await?;

    tracing::info!(id = %workout.id, "ワークアウトを記録しました");
    Ok((
        StatusCode::CREATED,
        Json(CreateWorkoutResponse {
            success: true,
            message: "Workout logged successfully".to_string(),
            workout,
        }),
    ))
}

/// GET /api/workouts
///
/// シート上の順（追加順）を反転し、新しい記録を先頭にして返す。
pub async fn list_workouts<S: WorkoutStore>(
    State(state): State<Arc<WorkoutState<S>>>,
) -> Result<Json<ListWorkoutsResponse>, ApiError> {
    let mut workouts = state.store.list().await?;
    workouts.reverse();

    Ok(Json(ListWorkoutsResponse {
        success: true,
        count: workouts.len(),
        workouts,
    }))
}

/// DELETE /api/workouts/{id}
///
/// ID カラムが一致する最初の行を行ごと削除する。該当行が無ければ 404。
pub async fn delete_workout<S: WorkoutStore>(
    State(state): State<Arc<WorkoutState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteWorkoutResponse>, ApiError> {
    if !state.store.delete(&id).await? {
        return Err(ApiError::WorkoutNotFound);
    }

    tracing::info!(%id, "ワークアウトを削除しました");
    Ok(Json(DeleteWorkoutResponse {
        success: true,
        message: "Workout deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_作成リクエストは全フィールド省略可能() {
        let req: CreateWorkoutRequest = serde_json::from_str("{}").unwrap();

        assert_eq!(req.workout_type, "");
        assert_eq!(req.duration, Number::from(0));
        assert_eq!(req.intensity, "");
        assert_eq!(req.notes, "");
    }

    #[test]
    fn test_作成リクエストのtypeフィールドが読み込まれる() {
        let raw = r#"{"type": "Run", "duration": 30, "intensity": "High", "notes": "morning"}"#;
        let req: CreateWorkoutRequest = serde_json::from_str(raw).unwrap();

        assert_eq!(req.workout_type, "Run");
        assert_eq!(req.duration, Number::from(30));
        assert_eq!(req.intensity, "High");
        assert_eq!(req.notes, "morning");
    }

    #[test]
    fn test_作成リクエストのdurationは小数も受け付ける() {
        let req: CreateWorkoutRequest =
            serde_json::from_str(r#"{"type": "Run", "duration": 12.5}"#).unwrap();

        assert_eq!(req.duration, Number::from_f64(12.5).unwrap());
    }

    #[test]
    fn test_未知のフィールドは無視される() {
        let req: CreateWorkoutRequest =
            serde_json::from_str(r#"{"type": "Yoga", "extra": true}"#).unwrap();

        assert_eq!(req.workout_type, "Yoga");
    }
}
