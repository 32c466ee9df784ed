//! # Sheets REST API クライアント
//!
//! Google Sheets REST API v4 のうち、このサービスが使う操作だけを持つ薄いクライアント。
//!
//! - メタデータ取得（ワークシート名 → 数値 sheetId の解決）
//! - ワークシート追加（`batchUpdate` / `addSheet`）
//! - 行追加（`values:append`）
//! - 値取得（`values:get`、全体または ID カラムのみ）
//! - 行削除（`batchUpdate` / `deleteDimension`）
//!
//! アクセストークンはコンストラクタで受け取る。1 インスタンス = 1 セッション。

use serde::Deserialize;
use serde_json::json;

use crate::error::SheetsError;

/// Sheets REST API のベース URL（テストでは差し替える）
pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";

/// Sheets API クライアント
///
/// 1 つのスプレッドシートに対する 1 セッション分の操作を提供する。
pub struct SheetsApiClient {
    http: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    access_token: String,
}

impl SheetsApiClient {
    /// 新しいクライアントを作成する
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        spreadsheet_id: &str,
        access_token: String,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            access_token,
        }
    }

    /// スプレッドシートのメタデータ（ワークシートの一覧）を取得する
    pub async fn spreadsheet_meta(&self) -> Result<SpreadsheetMeta, SheetsError> {
        let url = format!(
            "{}/v4/spreadsheets/{}?fields=sheets.properties",
            self.base_url, self.spreadsheet_id
        );

        let response = self.bearer(self.http.get(&url)).send().await?;
        let response = check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| SheetsError::UnexpectedResponse(e.to_string()))
    }

    /// ワークシートを追加し、新しい数値 sheetId を返す
    pub async fn add_worksheet(
        &self,
        title: &str,
        row_count: u32,
        column_count: u32,
    ) -> Result<i64, SheetsError> {
        let body = json!({
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": title,
                        "gridProperties": {
                            "rowCount": row_count,
                            "columnCount": column_count,
                        },
                    },
                },
            }],
        });

        let response = self
            .bearer(self.http.post(&self.batch_update_url()))
            .json(&body)
            .send()
            .await?;
        let response = check_status(response).await?;

        let reply: BatchUpdateReply = response
            .json()
            .await
            .map_err(|e| SheetsError::UnexpectedResponse(e.to_string()))?;

        reply
            .replies
            .into_iter()
            .find_map(|r| r.add_sheet)
            .map(|r| r.properties.sheet_id)
            .ok_or_else(|| {
                SheetsError::UnexpectedResponse("addSheet reply missing properties".to_string())
            })
    }

    /// ワークシート末尾に 1 行追加する
    pub async fn append_row(&self, title: &str, row: &[String]) -> Result<(), SheetsError> {
        let range = quoted_range(title, "!A1");
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}:append?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS",
            self.base_url,
            self.spreadsheet_id,
            urlencoding::encode(&range),
        );

        let response = self
            .bearer(self.http.post(&url))
            .json(&json!({ "values": [row] }))
            .send()
            .await?;
        check_status(response).await?;

        Ok(())
    }

    /// ワークシート全体のセル値を行単位で取得する（ヘッダ行を含む）
    pub async fn all_values(&self, title: &str) -> Result<Vec<Vec<String>>, SheetsError> {
        self.values(&quoted_range(title, "")).await
    }

    /// ID カラム（A 列）のセル値を行単位で取得する（ヘッダ行を含む）
    pub async fn id_column_values(&self, title: &str) -> Result<Vec<Vec<String>>, SheetsError> {
        self.values(&quoted_range(title, "!A:A")).await
    }

    /// 指定行（0 始まり）を行ごと削除する
    pub async fn delete_row(&self, sheet_id: i64, row_index: usize) -> Result<(), SheetsError> {
        let body = json!({
            "requests": [{
                "deleteDimension": {
                    "range": {
                        "sheetId": sheet_id,
                        "dimension": "ROWS",
                        "startIndex": row_index,
                        "endIndex": row_index + 1,
                    },
                },
            }],
        });

        let response = self
            .bearer(self.http.post(&self.batch_update_url()))
            .json(&body)
            .send()
            .await?;
        check_status(response).await?;

        Ok(())
    }

    async fn values(&self, range: &str) -> Result<Vec<Vec<String>>, SheetsError> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.base_url,
            self.spreadsheet_id,
            urlencoding::encode(range),
        );

        let response = self.bearer(self.http.get(&url)).send().await?;
        let response = check_status(response).await?;

        let range: ValueRange = response
            .json()
            .await
            .map_err(|e| SheetsError::UnexpectedResponse(e.to_string()))?;

        Ok(range.values)
    }

    fn batch_update_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}:batchUpdate",
            self.base_url, self.spreadsheet_id
        )
    }

    fn bearer(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.bearer_auth(&self.access_token)
    }
}

/// エラーステータスを [`SheetsError::Api`] に変換する
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SheetsError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(SheetsError::Api {
        status: status.as_u16(),
        body,
    })
}

/// A1 記法の範囲を作る（ワークシート名をクォートし、内部の `'` は二重化する）
fn quoted_range(title: &str, suffix: &str) -> String {
    format!("'{}'{}", title.replace('\'', "''"), suffix)
}

// --- レスポンス型 ---

/// スプレッドシートのメタデータ（`fields=sheets.properties` で絞った形）
#[derive(Debug, Deserialize)]
pub struct SpreadsheetMeta {
    #[serde(default)]
    pub sheets: Vec<SheetEntry>,
}

impl SpreadsheetMeta {
    /// タイトルからワークシートの数値 sheetId を引く
    pub fn find_sheet(&self, title: &str) -> Option<i64> {
        self.sheets
            .iter()
            .find(|s| s.properties.title == title)
            .map(|s| s.properties.sheet_id)
    }
}

/// メタデータ内の 1 ワークシート分のエントリ
#[derive(Debug, Deserialize)]
pub struct SheetEntry {
    pub properties: SheetProperties,
}

/// ワークシートのプロパティ
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    pub sheet_id: i64,
    pub title: String,
}

/// `values:get` のレスポンス
///
/// 範囲が空のとき `values` フィールド自体が省略されるため default を付ける。
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct BatchUpdateReply {
    #[serde(default)]
    replies: Vec<BatchUpdateReplyEntry>,
}

#[derive(Debug, Deserialize)]
struct BatchUpdateReplyEntry {
    #[serde(rename = "addSheet")]
    add_sheet: Option<AddSheetReply>,
}

#[derive(Debug, Deserialize)]
struct AddSheetReply {
    properties: SheetProperties,
}
