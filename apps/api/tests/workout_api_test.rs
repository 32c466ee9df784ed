//! # ワークアウト API の統合テスト
//!
//! スタブストアを注入したルーターに対して `oneshot` でリクエストを流し、
//! ワイヤ契約（ステータスコードと JSON ボディ）を検証する。
//!
//! - 作成はレコード全体をエコーし、ID はタイムスタンプ形式
//! - 一覧は追加順の逆（新しい順）
//! - 削除は該当行のみ消え、存在しない ID は 404
//! - セッション解決に失敗すると作成・一覧・削除すべて 500 固定メッセージ

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicI64, Ordering},
};

use async_trait::async_trait;
use axum::{Router, body::Body};
use chrono::{DateTime, Duration, TimeZone, Utc};
use fitlog_api::{app_builder::build_app, handler::WorkoutState};
use fitlog_domain::{Clock, Workout};
use fitlog_sheets::{SheetsError, StoreError, WorkoutStore};
use http::{Request, StatusCode, header};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

// --- テスト用スタブ ---

/// メモリ上の行リストを保持するスタブストア
///
/// `fail_connection` を立てると全操作がセッション解決失敗を返す。
#[derive(Clone)]
struct StubStore {
    rows: Arc<Mutex<Vec<Workout>>>,
    fail_connection: bool,
}

impl StubStore {
    fn new() -> Self {
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
            fail_connection: false,
        }
    }

    fn failing() -> Self {
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
            fail_connection: true,
        }
    }

    fn connection_error() -> StoreError {
        StoreError::Connection(SheetsError::Network("stub: no connection".to_string()))
    }

    fn snapshot(&self) -> Vec<Workout> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkoutStore for StubStore {
    async fn append(&self, workout: &Workout) -> Result<(), StoreError> {
        if self.fail_connection {
            return Err(Self::connection_error());
        }
        self.rows.lock().unwrap().push(workout.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Workout>, StoreError> {
        if self.fail_connection {
            return Err(Self::connection_error());
        }
        Ok(self.snapshot())
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        if self.fail_connection {
            return Err(Self::connection_error());
        }
        let mut rows = self.rows.lock().unwrap();
        match rows.iter().position(|w| w.id == id) {
            Some(index) => {
                rows.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// 呼び出しごとに 1 秒進む時計（同一秒内の ID 衝突を避ける）
struct TickingClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl TickingClock {
    fn new() -> Self {
        Self {
            // 2024-01-15 09:30:45 UTC
            start: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 45).unwrap(),
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for TickingClock {
    fn now(&self) -> DateTime<Utc> {
        self.start + Duration::seconds(self.ticks.fetch_add(1, Ordering::SeqCst))
    }
}

// --- ヘルパー ---

fn test_app(store: StubStore) -> Router {
    build_app(Arc::new(WorkoutState {
        store,
        clock: Arc::new(TickingClock::new()),
    }))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn post_workout(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/workouts")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_workouts() -> Request<Body> {
    Request::builder()
        .uri("/api/workouts")
        .body(Body::empty())
        .unwrap()
}

fn delete_workout(id: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(format!("/api/workouts/{id}"))
        .body(Body::empty())
        .unwrap()
}

// --- ヘルスチェック ---

#[tokio::test]
async fn test_ヘルスチェックは常に200を返す() {
    let app = test_app(StubStore::new());

    let (status, body) = send(
        &app,
        Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({ "status": "ok", "message": "Server is running" })
    );
}

#[tokio::test]
async fn test_ヘルスチェックはシート接続失敗に影響されない() {
    let app = test_app(StubStore::failing());

    let (status, _) = send(
        &app,
        Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

// --- 作成 ---

#[tokio::test]
async fn test_作成は201でレコード全体をエコーする() {
    let app = test_app(StubStore::new());

    let (status, body) = send(
        &app,
        post_workout(serde_json::json!({
            "type": "Run",
            "duration": 30,
            "intensity": "High",
            "notes": "morning",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Workout logged successfully");
    assert_eq!(body["workout"]["type"], "Run");
    assert_eq!(body["workout"]["duration"], 30);
    assert_eq!(body["workout"]["intensity"], "High");
    assert_eq!(body["workout"]["notes"], "morning");
}

#[tokio::test]
async fn test_作成されるidはタイムスタンプ形式() {
    let app = test_app(StubStore::new());

    let (_, body) = send(&app, post_workout(serde_json::json!({"type": "Run"}))).await;

    let id = body["workout"]["id"].as_str().unwrap();
    assert_eq!(id.len(), 14);
    assert!(id.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(id, "20240115093045");
    assert_eq!(body["workout"]["timestamp"], "2024-01-15 09:30:45");
}

#[tokio::test]
async fn test_省略フィールドはデフォルト補完される() {
    let app = test_app(StubStore::new());

    let (status, body) = send(&app, post_workout(serde_json::json!({}))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["workout"]["type"], "");
    assert_eq!(body["workout"]["duration"], 0);
    assert_eq!(body["workout"]["intensity"], "");
    assert_eq!(body["workout"]["notes"], "");
}

#[tokio::test]
async fn test_作成された行はストアに追加される() {
    let store = StubStore::new();
    let app = test_app(store.clone());

    send(&app, post_workout(serde_json::json!({"type": "Swim"}))).await;

    let rows = store.snapshot();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].workout_type, "Swim");
}

#[tokio::test]
async fn test_小数のdurationはそのままエコーされる() {
    let app = test_app(StubStore::new());

    let (status, body) = send(
        &app,
        post_workout(serde_json::json!({"type": "Run", "duration": 12.5})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["workout"]["duration"], 12.5);
}

#[tokio::test]
async fn test_不正なjsonボディは500のjsonエラーを返す() {
    let app = test_app(StubStore::new());

    let request = Request::builder()
        .method("POST")
        .uri("/api/workouts")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_content_type欠落の作成も500のjsonエラーを返す() {
    let app = test_app(StubStore::new());

    let request = Request::builder()
        .method("POST")
        .uri("/api/workouts")
        .body(Body::from(r#"{"type": "Run"}"#))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

// --- 一覧 ---

#[tokio::test]
async fn test_一覧は追加順の逆で返す() {
    let app = test_app(StubStore::new());

    send(&app, post_workout(serde_json::json!({"type": "A"}))).await;
    send(&app, post_workout(serde_json::json!({"type": "B"}))).await;

    let (status, body) = send(&app, get_workouts()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 2);
    assert_eq!(body["workouts"][0]["type"], "B");
    assert_eq!(body["workouts"][1]["type"], "A");
}

#[tokio::test]
async fn test_空の一覧はcount0を返す() {
    let app = test_app(StubStore::new());

    let (status, body) = send(&app, get_workouts()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["workouts"], serde_json::json!([]));
}

// --- 削除 ---

#[tokio::test]
async fn test_削除で該当行のみ消える() {
    let store = StubStore::new();
    let app = test_app(store.clone());

    let (_, first) = send(&app, post_workout(serde_json::json!({"type": "A"}))).await;
    send(&app, post_workout(serde_json::json!({"type": "B"}))).await;
    let id = first["workout"]["id"].as_str().unwrap();

    let (status, body) = send(&app, delete_workout(id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({ "success": true, "message": "Workout deleted successfully" })
    );

    let (_, listing) = send(&app, get_workouts()).await;
    assert_eq!(listing["count"], 1);
    assert_eq!(listing["workouts"][0]["type"], "B");
}

#[tokio::test]
async fn test_存在しないidの削除は404で記録を変えない() {
    let store = StubStore::new();
    let app = test_app(store.clone());

    send(&app, post_workout(serde_json::json!({"type": "A"}))).await;

    let (status, body) = send(&app, delete_workout("99999999999999")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, serde_json::json!({ "error": "Workout not found" }));
    assert_eq!(store.snapshot().len(), 1);
}

// --- 接続エラー ---

#[tokio::test]
async fn test_接続失敗時は作成一覧削除すべて500固定メッセージ() {
    let store = StubStore::failing();
    let app = test_app(store.clone());
    let expected = serde_json::json!({ "error": "Could not connect to Google Sheets" });

    let (status, body) = send(&app, post_workout(serde_json::json!({"type": "Run"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, expected);

    let (status, body) = send(&app, get_workouts()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, expected);

    let (status, body) = send(&app, delete_workout("20240115093045")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, expected);

    // 部分的な状態変化が無いこと
    assert!(store.snapshot().is_empty());
}

// --- シナリオ ---

#[tokio::test]
async fn test_作成から一覧と削除までの一連の流れ() {
    let app = test_app(StubStore::new());

    // POST → 201
    let (status, created) = send(
        &app,
        post_workout(serde_json::json!({
            "type": "Run",
            "duration": 30,
            "intensity": "High",
            "notes": "morning",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["workout"]["type"], "Run");
    assert_eq!(created["workout"]["duration"], 30);
    let id = created["workout"]["id"].as_str().unwrap().to_string();

    // GET → 先頭（最新）に含まれる
    let (_, listing) = send(&app, get_workouts()).await;
    assert_eq!(listing["workouts"][0]["id"], id.as_str());

    // DELETE → 200、以後の GET には含まれない
    let (status, _) = send(&app, delete_workout(&id)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, listing) = send(&app, get_workouts()).await;
    assert_eq!(listing["count"], 0);
}

// --- Request ID ---

#[tokio::test]
async fn test_レスポンスにuuid_v7のx_request_idが付与される() {
    let app = test_app(StubStore::new());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id ヘッダーが存在すること")
        .to_str()
        .unwrap();
    let uuid = uuid::Uuid::parse_str(request_id).unwrap();
    assert_eq!(uuid.get_version(), Some(uuid::Version::SortRand));
}
