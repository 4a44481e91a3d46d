//! カタログ照合で使う型定義
//!
//! - CatalogueRow: スプレッドシートの1行（公式メタデータ）
//! - CandidateImage: 画像ツリー上の実ファイル
//! - SignMeta: 画像ファイル名から引くメタデータ

use crate::error::{Error, Result};
use std::path::PathBuf;

/// フォルダ由来のカテゴリが見つからない場合のスラッグ
pub const UNCATEGORIZED_SLUG: &str = "uncategorized";

/// スプレッドシートの1行
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogueRow {
    /// 宣言された画像ファイル名（JPG列）
    pub image_name: String,
    /// カテゴリ（カンマ区切りの生テキスト）
    pub category: String,
    pub caption: String,
    pub description: String,
    /// 標識コード（DGNo列）
    pub code: String,
    pub shape: String,
    pub background_color: String,
    pub border_color: String,
    pub text_hint: String,
    pub symbol1: String,
    pub symbol2: String,
}

/// 画像ツリー上の候補ファイル
///
/// 同じファイル名が複数のカテゴリフォルダに存在しうる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateImage {
    pub basename: String,
    pub full_path: PathBuf,
    pub folder_slug: String,
}

impl CandidateImage {
    /// フルパスの文字数（解決時のタイブレークに使用）
    pub fn path_len(&self) -> usize {
        self.full_path.to_string_lossy().chars().count()
    }
}

/// 画像ファイル名から引く公式メタデータ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignMeta {
    pub category: String,
    pub description: String,
    pub caption: String,
    pub code: String,
    /// 元のファイル名（前後空白除去済み）
    pub image_name: String,
}

/// フォルダ命名規則のマーカーを検証する
pub fn validate_folder_marker(marker: &str) -> Result<()> {
    if marker.trim().is_empty() {
        return Err(Error::Config("folder marker must not be empty".into()));
    }
    Ok(())
}

/// パス要素列からカテゴリスラッグを決める
///
/// マーカーで終わる最初の要素。なければ `uncategorized`。
pub fn folder_slug_for<'a>(components: impl IntoIterator<Item = &'a str>, marker: &str) -> String {
    components
        .into_iter()
        .find(|part| part.ends_with(marker))
        .map(|part| part.to_string())
        .unwrap_or_else(|| UNCATEGORIZED_SLUG.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_slug_first_marked_component() {
        let parts = ["signs", "warning-signs-jpg", "old-jpg", "507.1LRR.jpg"];
        assert_eq!(folder_slug_for(parts, "-jpg"), "warning-signs-jpg");
    }

    #[test]
    fn test_folder_slug_uncategorized() {
        let parts = ["loose", "530A.jpg"];
        assert_eq!(folder_slug_for(parts, "-jpg"), UNCATEGORIZED_SLUG);
    }

    #[test]
    fn test_validate_folder_marker() {
        assert!(validate_folder_marker("-jpg").is_ok());
        assert!(matches!(validate_folder_marker("  "), Err(Error::Config(_))));
    }

    #[test]
    fn test_path_len_counts_chars() {
        let candidate = CandidateImage {
            basename: "a.jpg".into(),
            full_path: PathBuf::from("ü/a.jpg"),
            folder_slug: UNCATEGORIZED_SLUG.into(),
        };
        assert_eq!(candidate.path_len(), 7);
    }
}
