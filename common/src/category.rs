//! カテゴリ正規化モジュール
//!
//! スプレッドシートのカテゴリ表記（大文字小文字・空白・タイポの揺れあり）を
//! 固定のカテゴリスラッグに変換する。

/// 正規化済みラベル → カテゴリ基底名（フォルダマーカーを付けてスラッグになる）
const CATEGORY_TABLE: &[(&str, &str)] = &[
    ("warning signs", "warning-signs"),
    ("speed limit signs", "speed-limit-signs"),
    ("regulatory signs", "regulatory-signs"),
    ("bus and cycle signs", "bus-and-cycle-signs"),
    ("bus and cycle", "bus-and-cycle-signs"),
    ("level crossing signs", "level-crossing-signs"),
    ("tram signs", "tram-signs"),
    ("motorway signs", "motorway-signs"),
    ("on street parking", "on-street-parking"),
    ("road works and temporary", "road-works-and-temporary"),
    ("information signs", "information-signs"),
    ("traffic calming", "traffic-calming"),
    ("miscellaneous", "miscellaneous"),
    ("low bridge signs", "low-bridge-signs"),
    ("pedestrian zone signs", "pedestrian-zone-signs"),
    ("signs for cyclists and pedestrians", "signs-for-cyclists-and-pedestrians"),
    ("pedestrian cycle equestrian", "pedestrian-cycle-equestrian"),
    ("direction and tourist signs", "direction-and-tourist-signs"),
    ("tidal flow lane control", "tidal-flow-lane-control"),
];

/// カテゴリ基底名 → 表示名
const DISPLAY_NAMES: &[(&str, &str)] = &[
    ("bus-and-cycle-signs", "Bus and Cycle Signs"),
    ("direction-and-tourist-signs", "Direction and Tourist Signs"),
    ("information-signs", "Information Signs"),
    ("level-crossing-signs", "Level Crossing Signs"),
    ("low-bridge-signs", "Low Bridge Signs"),
    ("miscellaneous", "Miscellaneous"),
    ("motorway-signs", "Motorway Signs"),
    ("on-street-parking", "On-street Parking"),
    ("pedestrian-cycle-equestrian", "Pedestrian, Cycle and Equestrian"),
    ("pedestrian-zone-signs", "Pedestrian Zone Signs"),
    ("regulatory-signs", "Regulatory Signs"),
    ("road-works-and-temporary", "Road Works and Temporary"),
    ("signs-for-cyclists-and-pedestrians", "Cyclists and Pedestrians"),
    ("speed-limit-signs", "Speed Limit Signs"),
    ("tidal-flow-lane-control", "Tidal Flow Lane Control"),
    ("traffic-calming", "Traffic Calming"),
    ("tram-signs", "Tram Signs"),
    ("warning-signs", "Warning Signs"),
];

/// 小文字化し、英数字以外の連続を1つの空白にまとめてトリムする
pub fn normalize_label(value: &str) -> String {
    let spaced: String = value
        .chars()
        .map(|ch| if ch.is_alphanumeric() { ch } else { ' ' })
        .flat_map(|ch| ch.to_lowercase())
        .collect();
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 1ラベルをカテゴリ基底名に変換（未知のラベルは None）
pub fn base_for_label(label: &str) -> Option<&'static str> {
    let key = normalize_label(label);
    CATEGORY_TABLE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, base)| *base)
}

/// 1ラベルをスラッグ（基底名 + フォルダマーカー）に変換
pub fn slug_for_label(label: &str, marker: &str) -> Option<String> {
    base_for_label(label).map(|base| format!("{}{}", base, marker))
}

/// カンマ区切りのカテゴリ表記をスラッグ列に変換
///
/// 出現順を保ち、重複と未知ラベルは除く。先頭が主カテゴリ。
/// スラッグはスキャナーがフォルダ名から作るものと同じマーカーで終わる。
pub fn category_slugs(raw: &str, marker: &str) -> Vec<String> {
    let mut slugs: Vec<String> = Vec::new();
    if raw.is_empty() || raw == "nan" {
        return slugs;
    }

    for part in raw.split(',') {
        if let Some(slug) = slug_for_label(part, marker) {
            if !slugs.contains(&slug) {
                slugs.push(slug);
            }
        }
    }
    slugs
}

/// 公式カテゴリ表記を分割（前後空白除去、空要素除外）
pub fn official_categories(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_string())
        .collect()
}

/// スラッグの表示名
///
/// 既知のスラッグは固定の表示名、それ以外はマーカーを外してタイトルケース化。
pub fn display_name(slug: &str, marker: &str) -> String {
    let base = slug.strip_suffix(marker).unwrap_or(slug);
    if let Some((_, name)) = DISPLAY_NAMES.iter().find(|(b, _)| *b == base) {
        return name.to_string();
    }
    title_case(&slug.replace(marker, "").replace('-', " "))
}

/// 英字以外の直後を大文字、それ以外を小文字にする
fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("  Bus and Cycle Signs "), "bus and cycle signs");
        assert_eq!(normalize_label("On-street   Parking"), "on street parking");
        assert_eq!(normalize_label("Pedestrian, Cycle and Equestrian"), "pedestrian cycle and equestrian");
    }

    #[test]
    fn test_trailing_space_variant() {
        assert_eq!(category_slugs("Bus and Cycle Signs ", "-jpg"), vec!["bus-and-cycle-signs-jpg"]);
    }

    #[test]
    fn test_multiple_labels_keep_order_and_dedupe() {
        let slugs = category_slugs("Regulatory Signs, Warning signs,regulatory signs", "-jpg");
        assert_eq!(slugs, vec!["regulatory-signs-jpg", "warning-signs-jpg"]);
    }

    #[test]
    fn test_unknown_labels_dropped() {
        assert_eq!(category_slugs("Ferry Signs, Tram Signs", "-jpg"), vec!["tram-signs-jpg"]);
        assert!(category_slugs("", "-jpg").is_empty());
        assert!(category_slugs("nan", "-jpg").is_empty());
    }

    #[test]
    fn test_slugs_follow_folder_marker() {
        assert_eq!(category_slugs("Warning signs", "-images"), vec!["warning-signs-images"]);
        assert_eq!(slug_for_label("Bus and Cycle", "-jpg").as_deref(), Some("bus-and-cycle-signs-jpg"));
    }

    #[test]
    fn test_official_categories_verbatim() {
        assert_eq!(
            official_categories("Ferry Signs, Tram Signs ,"),
            vec!["Ferry Signs", "Tram Signs"]
        );
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("on-street-parking-jpg", "-jpg"), "On-street Parking");
        assert_eq!(display_name("ferry-and-port-jpg", "-jpg"), "Ferry And Port");
        assert_eq!(display_name("uncategorized", "-jpg"), "Uncategorized");
        assert_eq!(display_name("on-street-parking-images", "-images"), "On-street Parking");
    }
}
