//! 画像ツリーのスキャン
//!
//! ツリーを一度だけ走査し、ファイル名 → 同名ファイルの候補一覧 を作る。

use crate::error::{PackError, Result};
use regex::Regex;
use roadsign_common::types::{folder_slug_for, CandidateImage};
use std::collections::HashMap;
use std::path::Path;
use walkdir::WalkDir;

/// ファイル名 → 候補画像（走査順）
#[derive(Debug, Clone, Default)]
pub struct ImageIndex {
    by_name: HashMap<String, Vec<CandidateImage>>,
    file_count: usize,
    marker: String,
}

impl ImageIndex {
    /// 同名ファイルの候補（なければ空）
    pub fn candidates(&self, basename: &str) -> &[CandidateImage] {
        self.by_name.get(basename).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// 異なるファイル名の数
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// 画像ファイルの総数
    pub fn file_count(&self) -> usize {
        self.file_count
    }

    /// 走査に使ったフォルダマーカー
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// 複数フォルダに存在するファイル名の数
    pub fn duplicate_names(&self) -> usize {
        self.by_name.values().filter(|v| v.len() > 1).count()
    }

    fn push(&mut self, candidate: CandidateImage) {
        self.file_count += 1;
        self.by_name
            .entry(candidate.basename.clone())
            .or_default()
            .push(candidate);
    }
}

fn is_image_file(name: &str) -> bool {
    lazy_static::lazy_static! {
        static ref IMAGE_RE: Regex = Regex::new(r"(?i)\.(jpe?g|png)$").unwrap();
    }
    IMAGE_RE.is_match(name)
}

/// 画像ツリーから索引を作る
///
/// カテゴリはルートからの相対パスで、`marker` で終わる最初のフォルダ名。
pub fn build_image_index(root: &Path, marker: &str) -> Result<ImageIndex> {
    if !root.is_dir() {
        return Err(PackError::FolderNotFound(root.display().to_string()));
    }

    let mut index = ImageIndex {
        marker: marker.to_string(),
        ..Default::default()
    };

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let basename = entry.file_name().to_string_lossy().to_string();
        if !is_image_file(&basename) {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect();
        let folder_slug = folder_slug_for(parts.iter().map(|p| p.as_str()), marker);

        index.push(CandidateImage {
            basename,
            full_path: path.to_path_buf(),
            folder_slug,
        });
    }

    Ok(index)
}
