//! アセットパック生成

use crate::catalogue;
use crate::config::Config;
use crate::error::{PackError, Result};
use crate::export::{self, TrailingNewline, WrittenFile};
use crate::scanner::{self, ImageIndex};
use indicatif::{ProgressBar, ProgressStyle};
use roadsign_common::category::category_slugs;
use roadsign_common::pack::{self as pack_doc, AssetPack, PackSign, PACK_VERSION};
use roadsign_common::resolver::choose_candidate;
use roadsign_common::types::validate_folder_marker;
use roadsign_common::CatalogueRow;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// 生成結果
#[derive(Debug, Clone)]
pub struct PackSummary {
    pub pack_file: WrittenFile,
    pub signs: usize,
    pub categories: usize,
    pub copied_images: usize,
    /// 画像が見つからなかった名前（重複除去・ソート済み）
    pub missing_images: Vec<String>,
    /// 画像名が空でスキップした行
    pub skipped_rows: usize,
}

/// 行をまたいで持つ状態
#[derive(Debug, Default)]
struct PackState {
    signs: Vec<PackSign>,
    missing: Vec<String>,
    copied: HashSet<PathBuf>,
    primary_counts: HashMap<String, usize>,
    skipped_rows: usize,
}

impl PackState {
    /// 1行を解決し、画像をコピーして出力に加える
    fn process_row(
        &mut self,
        row: &CatalogueRow,
        index: &ImageIndex,
        asset_root: &Path,
        progress: &ProgressBar,
        verbose: bool,
    ) -> Result<()> {
        if row.image_name.is_empty() {
            self.skipped_rows += 1;
            return Ok(());
        }

        let preferred = category_slugs(&row.category, index.marker());
        let candidates = index.candidates(&row.image_name);
        let Some(candidate) = choose_candidate(candidates, &preferred) else {
            if verbose {
                progress.println(format!("  ⚠ 画像なし: {}", row.image_name));
            }
            self.missing.push(row.image_name.clone());
            return Ok(());
        };

        if verbose && candidates.len() > 1 {
            progress.println(format!(
                "  {} : {}件から {} を選択",
                row.image_name,
                candidates.len(),
                candidate.folder_slug
            ));
        }

        let target = asset_root.join("images").join(&candidate.folder_slug).join(&candidate.basename);
        if !self.copied.contains(&target) {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(&candidate.full_path, &target)?;
            self.copied.insert(target);
        }

        *self.primary_counts.entry(candidate.folder_slug.clone()).or_insert(0) += 1;
        let position = self.signs.len() + 1;
        self.signs.push(PackSign::from_row(position, row, candidate, &preferred));
        Ok(())
    }
}

/// パックの `generatedFrom`（画像ルートの親からの相対パス、`/` 区切り）
pub fn generated_from(spreadsheet: &Path, source_root: &Path) -> String {
    let base = source_root.parent().unwrap_or_else(|| Path::new(""));
    let relative = spreadsheet.strip_prefix(base).unwrap_or(spreadsheet);
    relative.to_string_lossy().replace('\\', "/")
}

/// 出力先を空にして作り直す
fn reset_output(asset_root: &Path) -> Result<()> {
    if asset_root.exists() {
        std::fs::remove_dir_all(asset_root)?;
    }
    std::fs::create_dir_all(asset_root.join("images"))?;
    Ok(())
}

/// アセットパックを生成する
pub fn build_pack(config: &Config, verbose: bool) -> Result<PackSummary> {
    validate_folder_marker(&config.folder_marker)?;
    if !config.spreadsheet.is_file() {
        return Err(PackError::FileNotFound(config.spreadsheet.display().to_string()));
    }
    if !config.source_root.is_dir() {
        return Err(PackError::FolderNotFound(config.source_root.display().to_string()));
    }

    // 出力を消す前に入力を全て読む
    let rows = catalogue::load_catalogue(&config.spreadsheet)?;
    let index = scanner::build_image_index(&config.source_root, &config.folder_marker)?;
    if verbose {
        println!(
            "  カタログ {}行 / 画像 {}枚（同名の重複 {}件）",
            rows.len(),
            index.file_count(),
            index.duplicate_names()
        );
    }

    reset_output(&config.asset_root)?;

    let progress = row_progress(rows.len(), verbose);

    let mut state = PackState::default();
    for row in &rows {
        state.process_row(row, &index, &config.asset_root, &progress, verbose)?;
        progress.inc(1);
    }
    progress.finish_and_clear();

    let missing_images = pack_doc::unique_sorted(&state.missing);
    let categories = pack_doc::summarize_categories(&state.primary_counts, &config.folder_marker);
    let pack = AssetPack {
        version: PACK_VERSION,
        generated_from: generated_from(&config.spreadsheet, &config.source_root),
        source_references: config.source_references.clone(),
        catalogue_size: state.signs.len(),
        missing_image_count: state.missing.len(),
        missing_images: missing_images.clone(),
        categories,
        signs: state.signs,
    };

    let pack_file = export::write_json(&config.pack_path(), &pack, TrailingNewline::No)?;

    Ok(PackSummary {
        pack_file,
        signs: pack.signs.len(),
        categories: pack.categories.len(),
        copied_images: state.copied.len(),
        missing_images,
        skipped_rows: state.skipped_rows,
    })
}

/// 行処理の進捗バー（verbose でなければ非表示）
fn row_progress(len: usize, verbose: bool) -> ProgressBar {
    if !verbose {
        return ProgressBar::hidden();
    }
    let progress = ProgressBar::new(len as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("  [{bar:40}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    progress
}
