use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("スプレッドシート読み込みエラー: {0}")]
    Spreadsheet(String),

    #[error("必須列がありません: {0}")]
    MissingColumn(String),

    #[error("シートが空です: {0}")]
    EmptySheet(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] roadsign_common::Error),
}

pub type Result<T> = std::result::Result<T, PackError>;
