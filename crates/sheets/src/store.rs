//! # ワークアウトストア
//!
//! ハンドラが使う永続化の境界（[`WorkoutStore`]）と、
//! スプレッドシートを保存先とする実装（[`SheetsWorkoutStore`]）。
//!
//! ## セッション解決
//!
//! 各操作はまず `resolve_session` でセッションを解決する:
//! 鍵ファイル読み込み → トークン取得 → メタデータ取得 → ワークシート ID 解決。
//! このフェーズの失敗は [`StoreError::Connection`]、解決後のシート操作の失敗は
//! [`StoreError::Operation`] になる。
//!
//! ## プロビジョニング
//!
//! ワークシートが無い場合の作成は、リクエスト処理の副作用ではなく
//! 起動時に 1 回呼ぶ冪等な [`ensure_worksheet`](SheetsWorkoutStore::ensure_worksheet)
//! に分離している。リクエスト経路ではワークシート欠落は接続エラー扱い。
//!
//! ## 削除のマッチング
//!
//! 削除対象は ID カラム（A 列）のみを走査する。任意セルへのマッチは
//! 行わない（日付セルなどへの誤マッチを防ぐため、ID カラムに限定する）。

use std::path::PathBuf;

use async_trait::async_trait;
use fitlog_domain::{SHEET_HEADER, Workout};

use crate::{
    auth::fetch_access_token,
    client::{DEFAULT_BASE_URL, SheetsApiClient},
    credentials::ServiceAccountKey,
    error::{SheetsError, StoreError},
};

/// 新規ワークシートのグリッドサイズ
const NEW_SHEET_ROWS: u32 = 1000;
const NEW_SHEET_COLUMNS: u32 = 10;

/// スプレッドシート接続の設定
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    /// サービスアカウント鍵ファイルのパス
    pub credentials_file: PathBuf,
    /// スプレッドシート ID（URL 中の ID 部分）
    pub spreadsheet_id: String,
    /// ワークシート（タブ）名
    pub worksheet_name: String,
    /// Sheets API のベース URL（本番では既定値のまま）
    pub base_url: String,
}

impl SheetsConfig {
    /// 新しい設定を作成する（ベース URL は既定値）
    pub fn new(
        credentials_file: impl Into<PathBuf>,
        spreadsheet_id: impl Into<String>,
        worksheet_name: impl Into<String>,
    ) -> Self {
        Self {
            credentials_file: credentials_file.into(),
            spreadsheet_id: spreadsheet_id.into(),
            worksheet_name: worksheet_name.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// ワークアウト記録の永続化境界
///
/// ハンドラはこのトレイトにのみ依存する。テストではスタブ実装を注入する。
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// 記録を 1 行追加する
    async fn append(&self, workout: &Workout) -> Result<(), StoreError>;

    /// 全記録をシート上の順（追加順）で取得する
    async fn list(&self) -> Result<Vec<Workout>, StoreError>;

    /// ID が一致する最初の行を削除する
    ///
    /// 削除したら `Ok(true)`、該当行が無ければ `Ok(false)` を返す。
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}

/// スプレッドシートを保存先とする [`WorkoutStore`] 実装
pub struct SheetsWorkoutStore {
    config: SheetsConfig,
    http: reqwest::Client,
}

/// 解決済みセッション（このリクエスト専用のクライアントとワークシート ID）
struct SheetSession {
    client: SheetsApiClient,
    sheet_id: i64,
}

impl SheetsWorkoutStore {
    /// 新しいストアを作成する
    ///
    /// `reqwest::Client` は内部でコネクションを使い回すが、
    /// 認証とシート解決はリクエストごとにやり直す。
    pub fn new(config: SheetsConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// ワークシートの存在を保証する（冪等、起動時に 1 回呼ぶ）
    ///
    /// 無ければ 1000 行 × 10 列で作成し、ヘッダ行を書き込む。
    pub async fn ensure_worksheet(&self) -> Result<(), SheetsError> {
        let client = self.authenticated_client().await?;
        let meta = client.spreadsheet_meta().await?;

        if meta.find_sheet(&self.config.worksheet_name).is_some() {
            return Ok(());
        }

        client
            .add_worksheet(&self.config.worksheet_name, NEW_SHEET_ROWS, NEW_SHEET_COLUMNS)
            .await?;
        let header: Vec<String> = SHEET_HEADER.iter().map(|s| s.to_string()).collect();
        client
            .append_row(&self.config.worksheet_name, &header)
            .await?;

        tracing::info!(
            worksheet = %self.config.worksheet_name,
            "ワークシートを作成し、ヘッダ行を書き込みました"
        );
        Ok(())
    }

    /// 認証済みクライアントを作成する（セッション解決の前半）
    async fn authenticated_client(&self) -> Result<SheetsApiClient, SheetsError> {
        let key = ServiceAccountKey::from_file(&self.config.credentials_file)?;
        let token = fetch_access_token(&self.http, &key).await?;
        Ok(SheetsApiClient::new(
            self.http.clone(),
            &self.config.base_url,
            &self.config.spreadsheet_id,
            token,
        ))
    }

    /// セッションを解決する（認証 + ワークシート ID の解決）
    async fn resolve_session(&self) -> Result<SheetSession, StoreError> {
        let resolve = async {
            let client = self.authenticated_client().await?;
            let meta = client.spreadsheet_meta().await?;
            let sheet_id = meta
                .find_sheet(&self.config.worksheet_name)
                .ok_or_else(|| {
                    SheetsError::WorksheetNotFound(self.config.worksheet_name.clone())
                })?;
            Ok(SheetSession { client, sheet_id })
        };

        resolve.await.map_err(StoreError::Connection)
    }
}

#[async_trait]
impl WorkoutStore for SheetsWorkoutStore {
    async fn append(&self, workout: &Workout) -> Result<(), StoreError> {
        let session = self.resolve_session().await?;

        session
            .client
            .append_row(&self.config.worksheet_name, &workout.to_row())
            .await
            .map_err(StoreError::Operation)
    }

    async fn list(&self) -> Result<Vec<Workout>, StoreError> {
        let session = self.resolve_session().await?;

        let rows = session
            .client
            .all_values(&self.config.worksheet_name)
            .await
            .map_err(StoreError::Operation)?;

        // 先頭行はヘッダ
        Ok(rows
            .iter()
            .skip(1)
            .map(|row| Workout::from_row(row))
            .collect())
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let session = self.resolve_session().await?;

        let column = session
            .client
            .id_column_values(&self.config.worksheet_name)
            .await
            .map_err(StoreError::Operation)?;

        let Some(row_index) = find_id_row(&column, id) else {
            return Ok(false);
        };

        session
            .client
            .delete_row(session.sheet_id, row_index)
            .await
            .map_err(StoreError::Operation)?;

        Ok(true)
    }
}

/// ID カラムの値から削除対象の行番号（0 始まり）を探す
///
/// 先頭行はヘッダなのでスキップする。最初に一致した行が対象になる。
fn find_id_row(column: &[Vec<String>], id: &str) -> Option<usize> {
    column
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, row)| row.first().is_some_and(|cell| cell == id))
        .map(|(index, _)| index)
}
