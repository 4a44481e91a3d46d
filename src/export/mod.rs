//! JSON出力
//!
//! 整形は常に同じ（インデント2、UTF-8そのまま）で、同じ入力からは
//! バイト単位で同じファイルになる。書き出し後のSHA-256を返す。

use crate::error::Result;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// 書き出したファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub sha256: String,
}

/// 末尾の改行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailingNewline {
    Yes,
    No,
}

/// 整形済みJSONのバイト列
pub fn to_pretty_bytes<T: Serialize>(value: &T, newline: TrailingNewline) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(value)?;
    if newline == TrailingNewline::Yes {
        bytes.push(b'\n');
    }
    Ok(bytes)
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// JSONを書き出す（親フォルダは作成）
pub fn write_json<T: Serialize>(path: &Path, value: &T, newline: TrailingNewline) -> Result<WrittenFile> {
    let bytes = to_pretty_bytes(value, newline)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, &bytes)?;

    Ok(WrittenFile {
        path: path.to_path_buf(),
        sha256: sha256_hex(&bytes),
    })
}

/// 同じ内容を複数のパスに書き出す
pub fn write_json_all<T: Serialize>(
    paths: &[PathBuf],
    value: &T,
    newline: TrailingNewline,
) -> Result<Vec<WrittenFile>> {
    paths.iter().map(|p| write_json(p, value, newline)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pretty_format() {
        let bytes = to_pretty_bytes(&json!({"a": [1], "b": "é"}), TrailingNewline::No).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "{\n  \"a\": [\n    1\n  ],\n  \"b\": \"é\"\n}");
    }

    #[test]
    fn test_trailing_newline() {
        let bytes = to_pretty_bytes(&json!([]), TrailingNewline::Yes).unwrap();
        assert_eq!(bytes, b"[]\n");
    }

    #[test]
    fn test_write_json_all_same_digest() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![dir.path().join("a/out.json"), dir.path().join("b/c/out.json")];
        let written = write_json_all(&paths, &json!({"k": 1}), TrailingNewline::Yes).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[0].sha256, written[1].sha256);
        assert_eq!(std::fs::read(&paths[0]).unwrap(), std::fs::read(&paths[1]).unwrap());
    }

    #[test]
    fn test_sha256_hex() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
