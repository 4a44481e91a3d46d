//! 学習コンテンツ（テキスト・問題集）の型と一括補完
//!
//! テキストは 章 → 節 → 標識エントリ の入れ子構造。
//! 読み込んだオブジェクトは `fields` にキー順ごと保持し、
//! 補完した値だけを元の位置に書き戻す。

use crate::enrich::{self, description_from_meaning, DEFAULT_CATEGORY, DEFAULT_DRIVER_ACTION, DEFAULT_TITLE};
use crate::error::Result;
use crate::meta_index::MetaIndex;
use crate::quiz::{self, DescriptionPools};
use serde::de::DeserializeOwned;
use serde::ser;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_DIFFICULTY: &str = "Medium";

/// テキスト全体
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct TheoryDocument {
    pub chapters: Vec<Chapter>,
    /// 読み込んだオブジェクト全体（キー順を保持）
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Chapter {
    pub sections: Vec<Section>,
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Section {
    pub signs: Vec<ContentEntry>,
    pub fields: Map<String, Value>,
}

/// 標識エントリ（画像参照は変更しない）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct ContentEntry {
    pub sign_id: Value,
    pub image_path: Option<String>,
    pub title: Option<String>,
    pub meaning: Option<String>,
    pub category: Option<String>,
    pub driver_action: Option<String>,
    pub memory_hint: Option<String>,
    pub code: Option<String>,
    pub fields: Map<String, Value>,
}

/// 既知のキーを型付きで読む（キーがなければ既定値）
fn field<T: DeserializeOwned + Default>(map: &Map<String, Value>, key: &str) -> serde_json::Result<T> {
    match map.get(key) {
        Some(value) => serde_json::from_value(value.clone()),
        None => Ok(T::default()),
    }
}

/// 既知のキーを書き戻す
///
/// 既存のキーは元の位置のまま値だけ置き換わり、新しいキーは末尾に付く。
fn put<T: Serialize>(map: &mut Map<String, Value>, key: &str, value: &T) -> serde_json::Result<()> {
    map.insert(key.to_string(), serde_json::to_value(value)?);
    Ok(())
}

fn put_some(map: &mut Map<String, Value>, key: &str, value: &Option<String>) -> serde_json::Result<()> {
    match value {
        Some(text) => put(map, key, text),
        None => Ok(()),
    }
}

/// 書き戻したオブジェクトとしてシリアライズできる型
trait MergeFields {
    fn merged(&self) -> serde_json::Result<Map<String, Value>>;
}

macro_rules! serialize_merged {
    ($($ty:ty),*) => {$(
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                self.merged()
                    .map_err(<S::Error as ser::Error>::custom)?
                    .serialize(serializer)
            }
        }
    )*};
}

serialize_merged!(TheoryDocument, Chapter, Section, ContentEntry);

impl TryFrom<Map<String, Value>> for TheoryDocument {
    type Error = serde_json::Error;

    fn try_from(fields: Map<String, Value>) -> serde_json::Result<Self> {
        Ok(Self {
            chapters: field(&fields, "chapters")?,
            fields,
        })
    }
}

impl MergeFields for TheoryDocument {
    fn merged(&self) -> serde_json::Result<Map<String, Value>> {
        let mut map = self.fields.clone();
        put(&mut map, "chapters", &self.chapters)?;
        Ok(map)
    }
}

impl TryFrom<Map<String, Value>> for Chapter {
    type Error = serde_json::Error;

    fn try_from(fields: Map<String, Value>) -> serde_json::Result<Self> {
        Ok(Self {
            sections: field(&fields, "sections")?,
            fields,
        })
    }
}

impl MergeFields for Chapter {
    fn merged(&self) -> serde_json::Result<Map<String, Value>> {
        let mut map = self.fields.clone();
        put(&mut map, "sections", &self.sections)?;
        Ok(map)
    }
}

impl TryFrom<Map<String, Value>> for Section {
    type Error = serde_json::Error;

    fn try_from(fields: Map<String, Value>) -> serde_json::Result<Self> {
        Ok(Self {
            signs: field(&fields, "signs")?,
            fields,
        })
    }
}

impl MergeFields for Section {
    fn merged(&self) -> serde_json::Result<Map<String, Value>> {
        let mut map = self.fields.clone();
        put(&mut map, "signs", &self.signs)?;
        Ok(map)
    }
}

impl TryFrom<Map<String, Value>> for ContentEntry {
    type Error = serde_json::Error;

    fn try_from(fields: Map<String, Value>) -> serde_json::Result<Self> {
        Ok(Self {
            sign_id: field(&fields, "sign_id")?,
            image_path: field(&fields, "image_path")?,
            title: field(&fields, "title")?,
            meaning: field(&fields, "meaning")?,
            category: field(&fields, "category")?,
            driver_action: field(&fields, "driver_action")?,
            memory_hint: field(&fields, "memory_hint")?,
            code: field(&fields, "code")?,
            fields,
        })
    }
}

impl MergeFields for ContentEntry {
    fn merged(&self) -> serde_json::Result<Map<String, Value>> {
        let mut map = self.fields.clone();
        if !self.sign_id.is_null() {
            put(&mut map, "sign_id", &self.sign_id)?;
        }
        put_some(&mut map, "image_path", &self.image_path)?;
        put_some(&mut map, "title", &self.title)?;
        put_some(&mut map, "meaning", &self.meaning)?;
        put_some(&mut map, "category", &self.category)?;
        put_some(&mut map, "driver_action", &self.driver_action)?;
        put_some(&mut map, "memory_hint", &self.memory_hint)?;
        put_some(&mut map, "code", &self.code)?;
        Ok(map)
    }
}

impl ContentEntry {
    /// 識別子の文字列表現（擬似乱数の種に使う）
    pub fn sign_key(&self) -> String {
        value_key(&self.sign_id)
    }

    /// 画像参照のファイル名部分
    pub fn image_filename(&self) -> String {
        self.image_path
            .as_deref()
            .and_then(|p| Path::new(p).file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    fn description(&self) -> String {
        description_from_meaning(self.meaning.as_deref().unwrap_or_default())
    }
}

/// 既存の問題（id と難易度の引き継ぎ用）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriorQuestion {
    #[serde(default)]
    pub sign_id: Value,
    #[serde(default)]
    pub id: Option<Value>,
    /// キーがあれば null でもそのまま引き継ぐ
    #[serde(default, deserialize_with = "present_value")]
    pub difficulty: Option<Value>,
}

/// キーの有無だけを Option で表す（null も Some(Value::Null)）
fn present_value<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// 問題レコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: i64,
    pub topic: String,
    pub difficulty: Value,
    pub question: String,
    pub image_path: Option<String>,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
    pub explanation: String,
    pub sign_id: Value,
}

/// 補完の統計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichmentStats {
    pub entries: usize,
    pub matched: usize,
    pub unmatched: Vec<String>,
}

/// JSON文字列からテキストを読み込み
pub fn parse_theory(json: &str) -> Result<TheoryDocument> {
    Ok(serde_json::from_str(json)?)
}

/// JSON文字列から既存の問題を読み込み
pub fn parse_prior_questions(json: &str) -> Result<Vec<PriorQuestion>> {
    Ok(serde_json::from_str(json)?)
}

/// シード用の文字列表現（文字列はそのまま、null は "None"）
fn value_key(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 既存の id を整数として読む
fn prior_id(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// 全エントリを補完する
pub fn enrich_entries(theory: &mut TheoryDocument, index: &MetaIndex) -> EnrichmentStats {
    let mut stats = EnrichmentStats::default();

    for entry in entries_mut(theory) {
        stats.entries += 1;
        let image_filename = entry.image_filename();
        let meta = index.lookup(&image_filename);
        match meta {
            Some(_) => stats.matched += 1,
            None => stats.unmatched.push(image_filename),
        }

        let out = enrich::enrich(
            meta,
            entry.title.as_deref().unwrap_or(DEFAULT_TITLE),
            entry.category.as_deref().unwrap_or(DEFAULT_CATEGORY),
            entry.driver_action.as_deref().unwrap_or(DEFAULT_DRIVER_ACTION),
        );

        entry.title = Some(out.title);
        entry.meaning = Some(out.meaning);
        entry.category = Some(out.category);
        entry.driver_action = Some(out.driver_action);
        entry.memory_hint = Some(out.memory_hint);
        if let Some(code) = out.code {
            entry.code = Some(code);
        }
    }

    stats
}

/// 章・節をまたいでエントリを順に列挙
pub fn entries(theory: &TheoryDocument) -> impl Iterator<Item = &ContentEntry> {
    theory
        .chapters
        .iter()
        .flat_map(|c| c.sections.iter())
        .flat_map(|s| s.signs.iter())
}

fn entries_mut(theory: &mut TheoryDocument) -> impl Iterator<Item = &mut ContentEntry> {
    theory
        .chapters
        .iter_mut()
        .flat_map(|c| c.sections.iter_mut())
        .flat_map(|s| s.signs.iter_mut())
}

/// 補完済みエントリから説明文プールを作る
pub fn description_pools(theory: &TheoryDocument) -> DescriptionPools {
    let mut pools = DescriptionPools::new();
    for entry in entries(theory) {
        pools.add(entry.category_or_default(), &entry.description());
    }
    pools
}

/// 補完済みエントリから問題を作る
pub fn build_questions(theory: &TheoryDocument, prior: &[PriorQuestion]) -> Vec<QuestionRecord> {
    // 同じ識別子は後の問題が優先
    let prior_by_sign: HashMap<String, &PriorQuestion> = prior
        .iter()
        .map(|q| (q.sign_id.to_string(), q))
        .collect();

    let pools = description_pools(theory);
    let all_descriptions = pools.all();

    entries(theory)
        .enumerate()
        .map(|(i, entry)| {
            let sign_key = entry.sign_key();
            let category = entry.category_or_default();
            let description = entry.description();

            let distractors =
                quiz::pick_distractors(&sign_key, &description, category, &pools, &all_descriptions);
            let (options, correct_answer_index) = quiz::rotate_options(&sign_key, &description, &distractors);

            let old = prior_by_sign.get(&entry.sign_id.to_string());
            let id = old
                .and_then(|q| prior_id(q.id.as_ref()))
                .unwrap_or(i as i64 + 1);
            let difficulty = old
                .and_then(|q| q.difficulty.clone())
                .unwrap_or_else(|| Value::String(DEFAULT_DIFFICULTY.to_string()));
            let action = entry.driver_action.as_deref().unwrap_or(DEFAULT_DRIVER_ACTION);

            QuestionRecord {
                id,
                topic: category.to_string(),
                difficulty,
                question: quiz::question_text(category),
                image_path: entry.image_path.clone(),
                options,
                correct_answer_index,
                explanation: quiz::explanation(&description, action),
                sign_id: entry.sign_id.clone(),
            }
        })
        .collect()
}

/// テキストを補完し、問題集を作り直す
pub fn enrich_documents(
    theory: &mut TheoryDocument,
    prior: &[PriorQuestion],
    index: &MetaIndex,
) -> (EnrichmentStats, Vec<QuestionRecord>) {
    let stats = enrich_entries(theory, index);
    let questions = build_questions(theory, prior);
    (stats, questions)
}
