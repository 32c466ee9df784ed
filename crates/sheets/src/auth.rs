//! # アクセストークン取得
//!
//! サービスアカウントの OAuth2 フロー（JWT Bearer assertion）を実装する。
//!
//! 1. `iss` = サービスアカウントのメールアドレス、`scope` = spreadsheets、
//!    `aud` = トークンエンドポイントのクレームを RS256 で署名する
//! 2. `grant_type=urn:ietf:params:oauth:grant-type:jwt-bearer` で
//!    トークンエンドポイントに POST し、アクセストークンを受け取る
//!
//! トークンはキャッシュしない。リクエストごとに取り直す。

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::{credentials::ServiceAccountKey, error::SheetsError};

/// スプレッドシート読み書きのスコープ
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// assertion の有効期間（Google の上限と同じ 1 時間）
const ASSERTION_LIFETIME_SECS: i64 = 3600;

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

/// 署名済み JWT assertion を作成する
///
/// 秘密鍵が PEM として解釈できない場合は [`SheetsError::Credentials`]、
/// 署名の失敗は [`SheetsError::TokenExchange`] になる。
pub fn build_assertion(
    key: &ServiceAccountKey,
    now: DateTime<Utc>,
) -> Result<String, SheetsError> {
    let iat = now.timestamp();
    let claims = Claims {
        iss: &key.client_email,
        scope: SPREADSHEETS_SCOPE,
        aud: &key.token_uri,
        iat,
        exp: iat + ASSERTION_LIFETIME_SECS,
    };

    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| SheetsError::Credentials(format!("invalid private key: {e}")))?;

    jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
        .map_err(|e| SheetsError::TokenExchange(format!("failed to sign assertion: {e}")))
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// アクセストークンを取得する
pub async fn fetch_access_token(
    http: &reqwest::Client,
    key: &ServiceAccountKey,
) -> Result<String, SheetsError> {
    let assertion = build_assertion(key, Utc::now())?;

    let params = [
        ("grant_type", JWT_BEARER_GRANT_TYPE),
        ("assertion", assertion.as_str()),
    ];
    let response = http.post(&key.token_uri).form(&params).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SheetsError::TokenExchange(format!(
            "status {status}: {body}"
        )));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| SheetsError::TokenExchange(format!("invalid token response: {e}")))?;

    Ok(token.access_token)
}
