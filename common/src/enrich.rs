//! コンテンツ補完モジュール
//!
//! 照合したメタデータからタイトル・カテゴリ・運転者の行動・覚え方を導く。
//! キーワード規則は上から順に評価し、最初に一致したものだけを使う。

use crate::types::SignMeta;

pub const DEFAULT_TITLE: &str = "Road sign";
pub const DEFAULT_CATEGORY: &str = "Road signs";
pub const DEFAULT_DRIVER_ACTION: &str = "Follow the sign instruction safely.";
pub const MEANING_PREFIX: &str = "This sign means: ";

/// キーワード規則
///
/// `any_of` のいずれか（空なら常に真）かつ `all_of` の全て、かつ `none_of` を含まない。
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub any_of: &'static [&'static str],
    pub all_of: &'static [&'static str],
    pub none_of: &'static [&'static str],
    pub result: &'static str,
}

impl KeywordRule {
    const fn any(any_of: &'static [&'static str], result: &'static str) -> Self {
        Self { any_of, all_of: &[], none_of: &[], result }
    }

    pub fn matches(&self, text: &str) -> bool {
        (self.any_of.is_empty() || self.any_of.iter().any(|k| text.contains(k)))
            && self.all_of.iter().all(|k| text.contains(k))
            && !self.none_of.iter().any(|k| text.contains(k))
    }
}

/// 説明文に対する行動規則
///
/// 順序が意味を持つ。例えば "End of 30 mph speed limit" は
/// "speed limit" の規則に先に一致し、"end of" の規則には届かない。
pub const DESCRIPTION_ACTION_RULES: &[KeywordRule] = &[
    KeywordRule::any(&["no entry"], "Do not enter. Find an alternative legal route."),
    KeywordRule {
        any_of: &["stop"],
        all_of: &[],
        none_of: &["bus stop"],
        result: "Stop fully, check all directions, then proceed only when safe.",
    },
    KeywordRule::any(&["give way", "yield"], "Give way to other traffic and continue only when safe."),
    KeywordRule::any(&["speed limit"], "Do not exceed the posted speed limit and adjust for conditions."),
    KeywordRule::any(&["minimum speed"], "Maintain at least the minimum speed when safe to do so."),
    KeywordRule {
        any_of: &[],
        all_of: &["end of", "speed"],
        none_of: &[],
        result: "The previous speed restriction ends here; follow the new road limit.",
    },
    KeywordRule::any(
        &["no left turn", "no right turn", "no u-turn"],
        "Do not make the prohibited turn shown by this sign.",
    ),
    KeywordRule::any(&["turn left", "turn right"], "Follow the turn direction shown and position early."),
    KeywordRule::any(&["ahead only", "straight ahead"], "Continue in the direction indicated by the sign."),
    KeywordRule::any(&["keep left", "keep right"], "Pass on the side indicated and keep within your lane."),
    KeywordRule::any(&["one way"], "Travel only in the permitted one-way direction."),
    KeywordRule {
        any_of: &["cyclists", "children", "school", "crossing", "event", "hazard", "bend", "junction"],
        all_of: &["ahead"],
        none_of: &[],
        result: "Reduce speed, scan ahead, and prepare early for the condition shown.",
    },
    KeywordRule::any(
        &["bus lane", "with-flow", "contra-flow", "route for use by"],
        "Use this lane only if your vehicle class is permitted by the sign.",
    ),
    KeywordRule::any(
        &["cycle lane", "cycle track", "pedal cycles only"],
        "Keep out of this lane unless your vehicle is specifically permitted.",
    ),
    KeywordRule::any(
        &["pedestrian", "zebra", "crossing"],
        "Slow down and be ready to stop for pedestrians as required.",
    ),
    KeywordRule::any(&["tram"], "Follow tram-specific restrictions and keep clear of tram tracks."),
    KeywordRule::any(
        &["weight limit", "max gross weight"],
        "Do not proceed if your vehicle exceeds the signed weight limit.",
    ),
    KeywordRule::any(
        &["width limit", "max width"],
        "Check vehicle width and do not enter if you exceed the limit.",
    ),
    KeywordRule::any(
        &["height limit", "low bridge"],
        "Check vehicle height and avoid this route if clearance is insufficient.",
    ),
    KeywordRule::any(
        &["parking", "waiting", "loading", "bay"],
        "Follow the parking, waiting, and loading restrictions exactly as signed.",
    ),
];

/// カテゴリに対する行動規則（説明文の規則がどれも一致しない場合）
pub const CATEGORY_ACTION_RULES: &[KeywordRule] = &[
    KeywordRule::any(&["warning"], "Reduce speed, scan ahead, and prepare for the hazard shown."),
    KeywordRule::any(
        &["direction", "information"],
        "Use the sign information early to choose the correct route and lane.",
    ),
    KeywordRule::any(&["regulatory"], "Comply with the mandatory or prohibitory instruction immediately."),
    KeywordRule::any(&["parking"], "Follow the signed parking and waiting conditions before stopping."),
];

/// カテゴリに対する覚え方の規則
pub const MEMORY_HINT_RULES: &[KeywordRule] = &[
    KeywordRule::any(&["warning"], "Warning signs usually prepare you for hazards ahead: ease speed early."),
    KeywordRule::any(&["regulatory"], "Regulatory signs are legal instructions: comply immediately."),
    KeywordRule::any(
        &["information", "direction"],
        "Read route information early so lane changes stay calm and safe.",
    ),
    KeywordRule::any(&["speed"], "Check the number and units quickly, then stabilise your speed."),
    KeywordRule::any(
        &["parking"],
        "For parking signs, check times, symbols, and exemptions before stopping.",
    ),
];

pub const DEFAULT_MEMORY_HINT: &str =
    "Read shape, colour, and symbol first, then apply the instruction early.";

/// 最初に一致した規則の結果
pub fn first_match(rules: &[KeywordRule], text: &str) -> Option<&'static str> {
    rules.iter().find(|rule| rule.matches(text)).map(|rule| rule.result)
}

/// 連続空白を1つにまとめてトリム
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 末尾をピリオド1つで終わらせる
pub fn to_sentence(value: &str) -> String {
    let text = collapse_whitespace(value);
    if text.is_empty() || text.ends_with('.') {
        text
    } else {
        format!("{}.", text)
    }
}

/// タイトル: 説明 → キャプション → 既存タイトル
pub fn build_title(meta: Option<&SignMeta>, fallback: &str) -> String {
    let Some(meta) = meta else {
        return fallback.to_string();
    };
    let candidate = if meta.description.is_empty() {
        &meta.caption
    } else {
        &meta.description
    };
    let candidate = collapse_whitespace(candidate);
    if candidate.is_empty() {
        fallback.to_string()
    } else {
        candidate
    }
}

/// カテゴリ: メタデータのカテゴリ → 既存カテゴリ
pub fn resolve_category(meta: Option<&SignMeta>, fallback: &str) -> String {
    let candidate = meta.map(|m| collapse_whitespace(&m.category)).unwrap_or_default();
    if candidate.is_empty() {
        fallback.to_string()
    } else {
        candidate
    }
}

/// 運転者の行動
///
/// メタデータがなければ既存の値をそのまま使う。
pub fn driver_action(meta: Option<&SignMeta>, category: &str, description: &str, fallback: &str) -> String {
    if meta.is_none() {
        return fallback.to_string();
    }

    let text = description.to_lowercase();
    let cat = category.to_lowercase();

    first_match(DESCRIPTION_ACTION_RULES, &text)
        .or_else(|| first_match(CATEGORY_ACTION_RULES, &cat))
        .map(|s| s.to_string())
        .unwrap_or_else(|| fallback.to_string())
}

/// カテゴリからの覚え方
pub fn memory_hint(category: &str) -> &'static str {
    first_match(MEMORY_HINT_RULES, &category.to_lowercase()).unwrap_or(DEFAULT_MEMORY_HINT)
}

/// 意味文
pub fn meaning_for(title: &str) -> String {
    format!("{}{}", MEANING_PREFIX, to_sentence(title))
}

/// 意味文から選択肢用の説明を取り出す（接頭辞と末尾のピリオド1つを除く）
pub fn description_from_meaning(meaning: &str) -> String {
    let text = meaning.replace(MEANING_PREFIX, "");
    let text = text.trim();
    text.strip_suffix('.').unwrap_or(text).to_string()
}

/// 1エントリ分の補完結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    pub title: String,
    pub meaning: String,
    pub category: String,
    pub driver_action: String,
    pub memory_hint: String,
    /// メタデータのコードが空でない場合のみ
    pub code: Option<String>,
}

/// 既存値とメタデータから補完結果を作る
pub fn enrich(
    meta: Option<&SignMeta>,
    existing_title: &str,
    existing_category: &str,
    existing_action: &str,
) -> Enrichment {
    let title = build_title(meta, existing_title);
    let category = resolve_category(meta, existing_category);
    let driver_action = driver_action(meta, &category, &title, existing_action);

    Enrichment {
        meaning: meaning_for(&title),
        memory_hint: memory_hint(&category).to_string(),
        code: meta.map(|m| m.code.clone()).filter(|c| !c.is_empty()),
        title,
        category,
        driver_action,
    }
}
