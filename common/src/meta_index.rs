//! メタデータ照合モジュール
//!
//! コンテンツ側の画像ファイル名から公式メタデータ行を引く。
//! 完全一致 → 拡張子なし一致 → 数値プレフィックス一致 → 英数字のみ一致
//! の順に試し、最初に見つかったものを返す。

use crate::types::SignMeta;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;

/// 照合が成立した段階
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStage {
    /// ファイル名の完全一致（小文字）
    Exact,
    /// 拡張子を除いた一致
    Stem,
    /// `530A` → `530` のような数値プレフィックス一致
    NumericPrefix,
    /// 英数字以外を除いた一致
    Compact,
}

impl std::fmt::Display for MatchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStage::Exact => write!(f, "exact"),
            MatchStage::Stem => write!(f, "stem"),
            MatchStage::NumericPrefix => write!(f, "numeric-prefix"),
            MatchStage::Compact => write!(f, "compact"),
        }
    }
}

/// ファイル名・ステムの両インデックス
///
/// `entries` は挿入順を保持する。同じファイル名の後続行は値だけ置き換える。
#[derive(Debug, Clone, Default)]
pub struct MetaIndex {
    entries: Vec<(String, SignMeta)>,
    by_name: HashMap<String, usize>,
    by_stem: HashMap<String, usize>,
}

type Stage = fn(&MetaIndex, &str) -> Option<usize>;

const STAGES: &[(MatchStage, Stage)] = &[
    (MatchStage::Exact, match_exact),
    (MatchStage::Stem, match_stem),
    (MatchStage::NumericPrefix, match_numeric_prefix),
    (MatchStage::Compact, match_compact),
];

impl MetaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// メタデータ列から構築（画像名が空の行は除外）
    pub fn from_metas(metas: impl IntoIterator<Item = SignMeta>) -> Self {
        let mut index = Self::new();
        for meta in metas {
            index.insert(meta);
        }
        index
    }

    /// 1件追加
    pub fn insert(&mut self, meta: SignMeta) {
        let name = meta.image_name.trim();
        if name.is_empty() {
            return;
        }
        let key = name.to_lowercase();

        match self.by_name.get(&key) {
            Some(&pos) => self.entries[pos].1 = meta,
            None => {
                let pos = self.entries.len();
                // 同じステムは後から追加された行が優先
                self.by_stem.insert(file_stem(&key), pos);
                self.by_name.insert(key.clone(), pos);
                self.entries.push((key, meta));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 挿入順に列挙
    pub fn iter(&self) -> impl Iterator<Item = &SignMeta> {
        self.entries.iter().map(|(_, meta)| meta)
    }

    /// 画像ファイル名からメタデータを引く
    pub fn lookup(&self, image_filename: &str) -> Option<&SignMeta> {
        self.lookup_with_stage(image_filename).map(|(meta, _)| meta)
    }

    /// 照合段階つきで引く
    pub fn lookup_with_stage(&self, image_filename: &str) -> Option<(&SignMeta, MatchStage)> {
        let lower = image_filename.to_lowercase();
        STAGES.iter().find_map(|(stage, run)| {
            run(self, &lower).map(|pos| (&self.entries[pos].1, *stage))
        })
    }
}

fn match_exact(index: &MetaIndex, lower: &str) -> Option<usize> {
    index.by_name.get(lower).copied()
}

fn match_stem(index: &MetaIndex, lower: &str) -> Option<usize> {
    index.by_stem.get(&file_stem(lower)).copied()
}

fn match_numeric_prefix(index: &MetaIndex, lower: &str) -> Option<usize> {
    let stem = file_stem(lower);
    let prefix = numeric_prefix(&stem)?;
    index.by_stem.get(prefix).copied()
}

fn match_compact(index: &MetaIndex, lower: &str) -> Option<usize> {
    let compact = compact_key(&file_stem(lower));
    index
        .entries
        .iter()
        .position(|(name, _)| compact_key(&file_stem(name)) == compact)
}

/// 拡張子を除いたファイル名（小文字）
pub fn file_stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// 先頭の数値トークン（小数部1つまで）
///
/// `507.1lrr` → `507.1`、`530a` → `530`
pub fn numeric_prefix(stem: &str) -> Option<&str> {
    lazy_static::lazy_static! {
        static ref NUMERIC_PREFIX_RE: Regex = Regex::new(r"^([0-9]+(?:\.[0-9]+)?)").unwrap();
    }
    NUMERIC_PREFIX_RE
        .captures(stem)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// 小文字化して英数字以外を取り除く
pub fn compact_key(value: &str) -> String {
    lazy_static::lazy_static! {
        static ref NON_ALNUM_RE: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
    }
    NON_ALNUM_RE.replace_all(&value.to_lowercase(), "").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(image_name: &str, description: &str) -> SignMeta {
        SignMeta {
            category: "Warning signs".into(),
            description: description.into(),
            caption: String::new(),
            code: String::new(),
            image_name: image_name.into(),
        }
    }

    fn sample_index() -> MetaIndex {
        MetaIndex::from_metas(vec![
            meta("530.jpg", "Maximum gross weight"),
            meta("507.1.jpg", "Width restriction"),
            meta("Road_Works-7001.jpg", "Road works"),
            meta("601.1.jpg", "Stop and give way"),
        ])
    }

    #[test]
    fn test_exact_match_case_insensitive() {
        let index = sample_index();
        let (found, stage) = index.lookup_with_stage("601.1.JPG").unwrap();
        assert_eq!(found.description, "Stop and give way");
        assert_eq!(stage, MatchStage::Exact);
    }

    #[test]
    fn test_stem_match_ignores_extension() {
        let index = sample_index();
        let (found, stage) = index.lookup_with_stage("601.1.png").unwrap();
        assert_eq!(found.description, "Stop and give way");
        assert_eq!(stage, MatchStage::Stem);
    }

    #[test]
    fn test_numeric_prefix_variant() {
        let index = sample_index();
        let (found, stage) = index.lookup_with_stage("530A.jpg").unwrap();
        assert_eq!(found.description, "Maximum gross weight");
        assert_eq!(stage, MatchStage::NumericPrefix);

        let (found, _) = index.lookup_with_stage("507.1LRR.jpg").unwrap();
        assert_eq!(found.description, "Width restriction");
    }

    #[test]
    fn test_earlier_stage_wins() {
        let mut index = sample_index();
        index.insert(meta("530a.jpg", "Variant A"));
        let (found, stage) = index.lookup_with_stage("530A.jpg").unwrap();
        assert_eq!(found.description, "Variant A");
        assert_eq!(stage, MatchStage::Exact);
    }

    #[test]
    fn test_compact_match() {
        let index = sample_index();
        let (found, stage) = index.lookup_with_stage("road works 7001.jpg").unwrap();
        assert_eq!(found.description, "Road works");
        assert_eq!(stage, MatchStage::Compact);
    }

    #[test]
    fn test_unmatched() {
        let index = sample_index();
        assert!(index.lookup("zebra.jpg").is_none());
        assert!(MetaIndex::new().lookup("530.jpg").is_none());
    }

    #[test]
    fn test_duplicate_name_replaces_value_keeps_position() {
        let mut index = sample_index();
        index.insert(meta("530.JPG", "Replaced"));
        assert_eq!(index.len(), 4);
        assert_eq!(index.iter().next().unwrap().description, "Replaced");
    }

    #[test]
    fn test_empty_names_skipped() {
        let index = MetaIndex::from_metas(vec![meta("  ", "blank")]);
        assert!(index.is_empty());
    }

    #[test]
    fn test_numeric_prefix_helper() {
        assert_eq!(numeric_prefix("507.1lrr"), Some("507.1"));
        assert_eq!(numeric_prefix("530a"), Some("530"));
        assert_eq!(numeric_prefix("a530"), None);
        // 小数部は1つまで
        assert_eq!(numeric_prefix("1.2.3x"), Some("1.2"));
    }
}
