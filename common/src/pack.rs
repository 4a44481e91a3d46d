//! 画像アセットパックの出力型

use crate::category::{display_name, official_categories};
use crate::types::{CandidateImage, CatalogueRow};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const PACK_VERSION: u32 = 1;

/// アセットパック全体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPack {
    pub version: u32,
    pub generated_from: String,
    pub source_references: Vec<String>,
    pub catalogue_size: usize,
    pub missing_image_count: usize,
    pub missing_images: Vec<String>,
    pub categories: Vec<PackCategory>,
    pub signs: Vec<PackSign>,
}

/// カテゴリごとの件数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackCategory {
    pub id: String,
    pub name: String,
    pub sign_count: usize,
}

/// 画像に解決済みの標識
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackSign {
    pub id: String,
    pub code: String,
    pub caption: String,
    pub description: String,
    pub official_category: String,
    pub official_categories: Vec<String>,
    pub primary_category_id: String,
    pub category_ids: Vec<String>,
    pub shape: String,
    pub background_color: String,
    pub border_color: String,
    pub text_hint: String,
    pub symbol1: String,
    pub symbol2: String,
    pub image_asset_path: String,
}

/// パック内の画像パス（`images/{slug}/{basename}`）
pub fn asset_path(candidate: &CandidateImage) -> String {
    format!("images/{}/{}", candidate.folder_slug, candidate.basename)
}

impl PackSign {
    /// カタログ行と選ばれた画像から作る
    ///
    /// `position` は出力済み件数 + 1。
    pub fn from_row(
        position: usize,
        row: &CatalogueRow,
        candidate: &CandidateImage,
        preferred: &[String],
    ) -> Self {
        let caption = if row.caption.is_empty() {
            row.description.clone()
        } else {
            row.caption.clone()
        };
        let category_ids = if preferred.is_empty() {
            vec![candidate.folder_slug.clone()]
        } else {
            preferred.to_vec()
        };

        Self {
            id: format!("sign-{}", position),
            code: row.code.clone(),
            caption,
            description: row.description.clone(),
            official_category: row.category.clone(),
            official_categories: official_categories(&row.category),
            primary_category_id: candidate.folder_slug.clone(),
            category_ids,
            shape: row.shape.clone(),
            background_color: row.background_color.clone(),
            border_color: row.border_color.clone(),
            text_hint: row.text_hint.clone(),
            symbol1: row.symbol1.clone(),
            symbol2: row.symbol2.clone(),
            image_asset_path: asset_path(candidate),
        }
    }
}

/// 主カテゴリの件数をまとめる（件数の降順、同数はスラッグ昇順）
pub fn summarize_categories(counts: &HashMap<String, usize>, marker: &str) -> Vec<PackCategory> {
    let mut sorted: Vec<(&String, &usize)> = counts.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    sorted
        .into_iter()
        .map(|(slug, count)| PackCategory {
            id: slug.clone(),
            name: display_name(slug, marker),
            sign_count: *count,
        })
        .collect()
}

/// 画像が見つからなかった名前（重複除去・ソート済み）
pub fn unique_sorted(names: &[String]) -> Vec<String> {
    let mut out = names.to_vec();
    out.sort();
    out.dedup();
    out
}
