//! 公式カタログ（スプレッドシート）の読み込み

use crate::error::{PackError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use roadsign_common::{CatalogueRow, MetaIndex, SignMeta};
use std::collections::HashMap;
use std::path::Path;

/// アセットパック生成に必要な列
pub const CATALOGUE_COLUMNS: &[&str] = &[
    "JPG", "Category", "Caption", "Description", "DGNo", "Shape", "BGColour", "BDColour", "Text",
];

/// メタデータ照合に必要な列
pub const META_COLUMNS: &[&str] = &["Category", "Description", "Caption", "DGNo", "JPG"];

/// 先頭シートの内容（ヘッダー行 + データ行）
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    columns: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl Sheet {
    /// ヘッダーとデータ行から作る（ヘッダーは前後空白除去、同名は先の列が優先）
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut columns = HashMap::new();
        for (i, name) in headers.into_iter().enumerate() {
            columns.entry(name.trim().to_string()).or_insert(i);
        }
        Self { columns, rows }
    }

    /// 必須列の存在確認
    pub fn require(&self, names: &[&str]) -> Result<()> {
        for name in names {
            if !self.columns.contains_key(*name) {
                return Err(PackError::MissingColumn(name.to_string()));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// セルの値（列がない・範囲外は空文字）
    pub fn cell(&self, row: usize, column: &str) -> &str {
        self.columns
            .get(column)
            .and_then(|&c| self.rows.get(row).and_then(|r| r.get(c)))
            .map(|s| s.as_str())
            .unwrap_or("")
    }
}

/// セルを文字列に（整数値の浮動小数は小数点なし）
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        other => other.to_string().trim().to_string(),
    }
}

/// 先頭シートを読み込む
pub fn read_sheet(path: &Path) -> Result<Sheet> {
    if !path.is_file() {
        return Err(PackError::FileNotFound(path.display().to_string()));
    }

    let mut workbook =
        open_workbook_auto(path).map_err(|e| PackError::Spreadsheet(format!("{}: {}", path.display(), e)))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| PackError::EmptySheet(path.display().to_string()))?
        .map_err(|e| PackError::Spreadsheet(e.to_string()))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| PackError::EmptySheet(path.display().to_string()))?
        .iter()
        .map(cell_text)
        .collect();
    let data: Vec<Vec<String>> = rows.map(|r| r.iter().map(cell_text).collect()).collect();

    Ok(Sheet::new(headers, data))
}

/// シートからカタログ行を作る
pub fn catalogue_rows(sheet: &Sheet) -> Result<Vec<CatalogueRow>> {
    sheet.require(CATALOGUE_COLUMNS)?;

    Ok((0..sheet.len())
        .map(|i| CatalogueRow {
            image_name: sheet.cell(i, "JPG").to_string(),
            category: sheet.cell(i, "Category").to_string(),
            caption: sheet.cell(i, "Caption").to_string(),
            description: sheet.cell(i, "Description").to_string(),
            code: sheet.cell(i, "DGNo").to_string(),
            shape: sheet.cell(i, "Shape").to_string(),
            background_color: sheet.cell(i, "BGColour").to_string(),
            border_color: sheet.cell(i, "BDColour").to_string(),
            text_hint: sheet.cell(i, "Text").to_string(),
            symbol1: sheet.cell(i, "Symbol1").to_string(),
            symbol2: sheet.cell(i, "Symbol2").to_string(),
        })
        .collect())
}

/// シートからメタデータ索引を作る
pub fn meta_index(sheet: &Sheet) -> Result<MetaIndex> {
    sheet.require(META_COLUMNS)?;

    Ok(MetaIndex::from_metas((0..sheet.len()).map(|i| SignMeta {
        category: sheet.cell(i, "Category").to_string(),
        description: sheet.cell(i, "Description").to_string(),
        caption: sheet.cell(i, "Caption").to_string(),
        code: sheet.cell(i, "DGNo").to_string(),
        image_name: sheet.cell(i, "JPG").to_string(),
    })))
}

/// スプレッドシートからカタログ行を読み込む
pub fn load_catalogue(path: &Path) -> Result<Vec<CatalogueRow>> {
    catalogue_rows(&read_sheet(path)?)
}

/// スプレッドシートからメタデータ索引を読み込む
pub fn load_meta_index(path: &Path) -> Result<MetaIndex> {
    meta_index(&read_sheet(path)?)
}
