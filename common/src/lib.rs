//! Road sign catalogue matching and enrichment engine
//!
//! 公式カタログ（スプレッドシート）と画像ツリー・学習コンテンツを結びつける。
//! ファイル入出力は持たず、CLI側から呼び出される。

pub mod error;
pub mod types;
pub mod category;
pub mod resolver;
pub mod meta_index;
pub mod enrich;
pub mod quiz;
pub mod content;
pub mod pack;

pub use error::{Error, Result};
pub use types::{CandidateImage, CatalogueRow, SignMeta};
pub use meta_index::{MatchStage, MetaIndex};
pub use content::{ContentEntry, PriorQuestion, QuestionRecord, TheoryDocument};
pub use pack::{AssetPack, PackCategory, PackSign};
