//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置し、親モジュールで re-export する
//! - ハンドラは薄く保ち、永続化は [`fitlog_sheets::WorkoutStore`] に委譲する
//! - プロセス内にリクエスト横断の状態は持たない（状態はすべてシート側にある）

pub mod health;
pub mod workout;

pub use health::health_check;
pub use workout::{WorkoutState, create_workout, delete_workout, list_workouts};
