//! roadsign-pack
//!
//! 公式カタログ（スプレッドシート）・画像ツリー・学習コンテンツのファイル入出力と
//! CLI。照合と補完の本体は `roadsign-common`。

pub mod cli;
pub mod config;
pub mod error;
pub mod scanner;
pub mod catalogue;
pub mod export;
pub mod pipeline;
