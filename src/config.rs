use crate::error::{PackError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 設定ファイルの場所を上書きする環境変数
pub const CONFIG_ENV: &str = "ROADSIGN_PACK_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 画像ツリーのルート
    pub source_root: PathBuf,
    /// 公式カタログのスプレッドシート
    pub spreadsheet: PathBuf,
    /// アセットパックの出力先（毎回作り直す）
    pub asset_root: PathBuf,
    pub pack_file_name: String,
    /// カテゴリフォルダ名の接尾辞
    pub folder_marker: String,
    pub source_references: Vec<String>,
    /// テキストJSON（入力兼出力）
    pub theory_path: PathBuf,
    /// 問題集JSON（入力兼出力）
    pub questions_path: PathBuf,
    /// 同じ内容を書き出す追加フォルダ
    pub mirror_dirs: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("roadsign"),
            spreadsheet: PathBuf::from("roadsign/traffic-signs-images-image-details.xls"),
            asset_root: PathBuf::from("android/app/src/main/assets/traffic_signs"),
            pack_file_name: "traffic_signs_pack_v1.json".into(),
            folder_marker: "-jpg".into(),
            source_references: vec![
                "https://www.gov.uk/government/publications/know-your-traffic-signs".into(),
                "https://assets.publishing.service.gov.uk/media/656ef4271104cf0013fa74ef/know-your-traffic-signs-dft.pdf".into(),
            ],
            theory_path: PathBuf::from("trafficsigns/Drivest_KnowYourSigns_Theory_Expanded.json"),
            questions_path: PathBuf::from("trafficsigns/Drivest_KnowYourSigns_Questions_Expanded.json"),
            mirror_dirs: vec![PathBuf::from("ios/DrivestNavigation/Resources/Data/knowyoursigns")],
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        roadsign_common::types::validate_folder_marker(&config.folder_marker)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(config_path)
    }

    pub fn config_path() -> Result<PathBuf> {
        // 環境変数を優先
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }

        let home = dirs::home_dir()
            .ok_or_else(|| PackError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("roadsign-pack").join("config.json"))
    }

    /// パックJSONの出力パス
    pub fn pack_path(&self) -> PathBuf {
        self.asset_root.join(&self.pack_file_name)
    }
}
