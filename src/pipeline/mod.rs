//! 一括処理
//!
//! - pack: カタログ行 → 画像解決 → アセットパック
//! - enrich: テキスト補完 → 問題集の再生成
//!
//! どちらも入力の存在確認を先に済ませ、致命的なエラーでは何も書き出さない。

pub mod pack;
pub mod enrich;

pub use pack::{build_pack, PackSummary};
pub use enrich::{run_enrichment, EnrichSummary};
