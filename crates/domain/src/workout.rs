//! # ワークアウト記録
//!
//! ドメインの唯一のエンティティ。スプレッドシートの 1 行に対応する。
//!
//! ## シートレイアウト
//!
//! ワークシートの 1 行目は固定ヘッダ（[`SHEET_HEADER`]）、
//! 2 行目以降が記録本体。カラム順はヘッダ順に固定される。
//!
//! ## ID について
//!
//! ID は作成時刻から導出される `YYYYMMDDHHMMSS` 形式の文字列。
//! 同一秒内の並行作成では衝突し得る（ワイヤ契約として形式を維持しており、
//! 一意性はシート側でも強制されない）。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::clock::Clock;

/// ワークシート 1 行目の固定ヘッダ（カラム順を規定する）
pub const SHEET_HEADER: [&str; 6] = [
    "ID",
    "Timestamp",
    "Workout Type",
    "Duration (min)",
    "Intensity",
    "Notes",
];

/// ワークアウト記録
///
/// JSON 表現ではフィールド `type` がカテゴリを表す（Rust では予約語のため
/// `workout_type` にリネームしている）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workout {
    /// 作成時刻由来の識別子（`YYYYMMDDHHMMSS`）
    pub id: String,
    /// 人間可読な作成時刻（`YYYY-MM-DD HH:MM:SS`）
    pub timestamp: String,
    /// 種目（自由記述、省略時は空文字列）
    #[serde(rename = "type", default)]
    pub workout_type: String,
    /// 所要時間（分、省略時は 0）
    ///
    /// JSON の数値をそのまま保持する（`30` は整数のまま、`12.5` は小数のまま
    /// エコーされる）。
    #[serde(default = "zero_duration")]
    pub duration: Number,
    /// 強度（自由記述、省略時は空文字列）
    #[serde(default)]
    pub intensity: String,
    /// メモ（自由記述、省略時は空文字列）
    #[serde(default)]
    pub notes: String,
}

impl Workout {
    /// 新しいワークアウト記録を作成する
    ///
    /// `id` と `timestamp` は `clock` の現在時刻から導出する。
    pub fn log(
        clock: &dyn Clock,
        workout_type: String,
        duration: Number,
        intensity: String,
        notes: String,
    ) -> Self {
        let now = clock.now();
        Self {
            id: format_id(&now),
            timestamp: format_timestamp(&now),
            workout_type,
            duration,
            intensity,
            notes,
        }
    }

    /// ヘッダ順のシート 1 行（6 カラム）に変換する
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.timestamp.clone(),
            self.workout_type.clone(),
            self.duration.to_string(),
            self.intensity.clone(),
            self.notes.clone(),
        ]
    }

    /// シート 1 行（セル文字列の列）からレコードを復元する
    ///
    /// 欠けているセルは空文字列 / 0 でデフォルト補完する。
    /// `duration` セルが数値として解釈できない場合も 0 にフォールバックする。
    pub fn from_row(cells: &[String]) -> Self {
        let cell = |i: usize| cells.get(i).cloned().unwrap_or_default();
        Self {
            id: cell(0),
            timestamp: cell(1),
            workout_type: cell(2),
            duration: parse_duration(&cell(3)),
            intensity: cell(4),
            notes: cell(5),
        }
    }
}

fn zero_duration() -> Number {
    Number::from(0)
}

/// シートのセル値を数値に解釈する
///
/// 整数として読めれば整数のまま、そうでなければ小数として読む。
/// どちらでもないセルは 0 にフォールバックする。
fn parse_duration(cell: &str) -> Number {
    let cell = cell.trim();
    if let Ok(n) = cell.parse::<i64>() {
        return Number::from(n);
    }
    cell.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .unwrap_or_else(zero_duration)
}

/// 作成時刻から ID（`YYYYMMDDHHMMSS`）を導出する
fn format_id(now: &DateTime<Utc>) -> String {
    now.format("%Y%m%d%H%M%S").to_string()
}

/// 作成時刻を人間可読形式（`YYYY-MM-DD HH:MM:SS`）にする
fn format_timestamp(now: &DateTime<Utc>) -> String {
    now.format("%Y-%m-%d %H:%M:%S").to_string()
}
