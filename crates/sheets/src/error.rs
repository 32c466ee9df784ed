//! # Sheets クレートのエラー型

use thiserror::Error;

/// Google Sheets アクセスで発生するエラー
#[derive(Debug, Error)]
pub enum SheetsError {
    /// サービスアカウント資格情報の読み込み・解釈の失敗
    #[error("credentials error: {0}")]
    Credentials(String),

    /// アクセストークン取得の失敗
    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    /// 設定されたワークシートが存在しない
    #[error("worksheet {0:?} not found")]
    WorksheetNotFound(String),

    /// ネットワークエラー
    #[error("network error: {0}")]
    Network(String),

    /// Sheets API がエラーステータスを返した
    #[error("sheets api error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// レスポンスボディの解釈に失敗した
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl From<reqwest::Error> for SheetsError {
    fn from(err: reqwest::Error) -> Self {
        SheetsError::Network(err.to_string())
    }
}

/// ストア操作のエラー
///
/// ハンドラ境界での HTTP ステータス決定のため、
/// セッション解決フェーズの失敗（→ 500 固定メッセージ）と
/// 解決後の操作の失敗（→ 500 エラーテキスト）を区別する。
#[derive(Debug, Error)]
pub enum StoreError {
    /// 資格情報・トークン・ワークシート解決のいずれかに失敗した
    #[error("could not connect to the spreadsheet: {0}")]
    Connection(#[source] SheetsError),

    /// セッション解決後のシート操作に失敗した
    #[error("{0}")]
    Operation(#[source] SheetsError),
}
