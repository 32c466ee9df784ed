//! # Fitlog ドメイン
//!
//! ワークアウト記録のドメイン型を提供する。
//!
//! ## 設計方針
//!
//! - インフラ（Google Sheets）にも API 層にも依存しない純粋なデータ型のみを配置
//! - シート 1 行とレコード 1 件の対応（ヘッダ順のカラムマッピング）はここで定義する
//! - 時刻取得は [`Clock`] トレイトで抽象化し、テストで固定時刻を注入可能にする

pub mod clock;
pub mod workout;

pub use clock::{Clock, FixedClock, SystemClock};
pub use workout::{SHEET_HEADER, Workout};
