//! 월별 수익률 히트맵 CLI 명령어.

pub mod commands;

pub use commands::*;
