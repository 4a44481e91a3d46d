//! テキスト・問題集の補完

use crate::catalogue;
use crate::config::Config;
use crate::error::{PackError, Result};
use crate::export::{self, TrailingNewline, WrittenFile};
use roadsign_common::content::{self, EnrichmentStats, PriorQuestion};
use std::path::{Path, PathBuf};

/// 補完結果
#[derive(Debug, Clone)]
pub struct EnrichSummary {
    /// スプレッドシートのメタデータ件数
    pub meta_rows: usize,
    pub stats: EnrichmentStats,
    pub questions: usize,
    pub theory_files: Vec<WrittenFile>,
    pub question_files: Vec<WrittenFile>,
}

/// 主パスとミラーフォルダ内の同名パス
pub fn output_paths(primary: &Path, mirror_dirs: &[PathBuf]) -> Vec<PathBuf> {
    let mut paths = vec![primary.to_path_buf()];
    if let Some(name) = primary.file_name() {
        paths.extend(mirror_dirs.iter().map(|dir| dir.join(name)));
    }
    paths
}

fn read_required(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(PackError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// 既存の問題集（なければ空）
fn read_prior_questions(path: &Path, verbose: bool) -> Result<Vec<PriorQuestion>> {
    if !path.is_file() {
        if verbose {
            println!("  既存の問題集なし: {}", path.display());
        }
        return Ok(Vec::new());
    }
    let json = std::fs::read_to_string(path)?;
    Ok(content::parse_prior_questions(&json)?)
}

/// メタデータでテキストを補完し、問題集を作り直す
pub fn run_enrichment(config: &Config, verbose: bool) -> Result<EnrichSummary> {
    // 書き出し前に入力を全て読む
    let index = catalogue::load_meta_index(&config.spreadsheet)?;
    let mut theory = content::parse_theory(&read_required(&config.theory_path)?)?;
    let prior = read_prior_questions(&config.questions_path, verbose)?;

    let (stats, questions) = content::enrich_documents(&mut theory, &prior, &index);
    if verbose {
        for name in &stats.unmatched {
            println!("  ⚠ メタデータなし: {}", name);
        }
    }

    let theory_files = export::write_json_all(
        &output_paths(&config.theory_path, &config.mirror_dirs),
        &theory,
        TrailingNewline::Yes,
    )?;
    let question_files = export::write_json_all(
        &output_paths(&config.questions_path, &config.mirror_dirs),
        &questions,
        TrailingNewline::Yes,
    )?;

    Ok(EnrichSummary {
        meta_rows: index.len(),
        stats,
        questions: questions.len(),
        theory_files,
        question_files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_paths() {
        let paths = output_paths(
            Path::new("trafficsigns/theory.json"),
            &[PathBuf::from("ios/data"), PathBuf::from("web/data")],
        );
        assert_eq!(
            paths,
            vec![
                PathBuf::from("trafficsigns/theory.json"),
                PathBuf::from("ios/data/theory.json"),
                PathBuf::from("web/data/theory.json"),
            ]
        );
    }

    #[test]
    fn test_missing_theory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_required(&dir.path().join("theory.json"));
        assert!(matches!(result, Err(PackError::FileNotFound(_))));
    }

    #[test]
    fn test_missing_questions_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let prior = read_prior_questions(&dir.path().join("questions.json"), false).unwrap();
        assert!(prior.is_empty());
    }
}
