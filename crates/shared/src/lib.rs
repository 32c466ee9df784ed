//! # Fitlog 共有ユーティリティ
//!
//! ワークスペース全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のクレート（domain, sheets, api）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum への依存は入れない（レスポンス変換は api クレートの責務）

pub mod error_body;
pub mod health;
pub mod observability;

pub use error_body::ErrorBody;
pub use health::HealthResponse;
