//! クイズ問題の生成
//!
//! 誤答選択肢の選定と選択肢の並び替えは、識別子の文字コード和による
//! 決定的な擬似乱数で行う。出力の再現性のため、この計算方法は変更しない。

use crate::enrich::to_sentence;
use std::collections::HashMap;

/// 誤答の選択で進める歩幅
pub const DISTRACTOR_STRIDE: usize = 7;
/// 誤答の数
pub const DISTRACTOR_COUNT: usize = 3;
/// 選択肢の並び替えに使う識別子の接尾辞
pub const OPTION_SEED_SUFFIX: &str = "::opt";

/// 候補が全くない場合の誤答
pub const EMPTY_POOL_DISTRACTORS: [&str; 3] = [
    "Follow the opposite maneuver shown on the sign.",
    "Ignore the sign if traffic is light.",
    "Use sat-nav only and disregard this sign.",
];

/// 誤答が3つに満たない場合の補充（位置で選ぶ）
pub const PADDING_DISTRACTORS: [&str; 3] = [
    "Ignore the sign unless traffic is heavy.",
    "Follow only road markings and ignore this sign.",
    "Continue unchanged and review later.",
];

/// 文字コード和による決定的なインデックス（size が 0 なら 0）
pub fn stable_index(seed: &str, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    let sum: u64 = seed.chars().map(|ch| ch as u64).sum();
    (sum % size as u64) as usize
}

/// カテゴリ別の説明文プール
///
/// カテゴリは初出順、説明文はカテゴリ内で重複なし。
#[derive(Debug, Clone, Default)]
pub struct DescriptionPools {
    categories: Vec<String>,
    by_category: HashMap<String, Vec<String>>,
}

impl DescriptionPools {
    pub fn new() -> Self {
        Self::default()
    }

    /// カテゴリを登録し、空でない説明文を追加
    pub fn add(&mut self, category: &str, description: &str) {
        if !self.by_category.contains_key(category) {
            self.categories.push(category.to_string());
        }
        let pool = self.by_category.entry(category.to_string()).or_default();
        if !description.is_empty() && !pool.iter().any(|d| d == description) {
            pool.push(description.to_string());
        }
    }

    pub fn category(&self, category: &str) -> &[String] {
        self.by_category.get(category).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// 全カテゴリの説明文（カテゴリ初出順、重複なし）
    pub fn all(&self) -> Vec<String> {
        let mut all: Vec<String> = Vec::new();
        for category in &self.categories {
            for description in self.category(category) {
                if !all.contains(description) {
                    all.push(description.clone());
                }
            }
        }
        all
    }
}

/// 誤答を3つ選ぶ
///
/// 同カテゴリのプール（正答を除く）が3件未満なら全体プールを使う。
pub fn pick_distractors(
    sign_key: &str,
    correct: &str,
    category: &str,
    pools: &DescriptionPools,
    all_descriptions: &[String],
) -> Vec<String> {
    let category_pool: Vec<&String> = pools
        .category(category)
        .iter()
        .filter(|d| d.as_str() != correct)
        .collect();
    let pool: Vec<&String> = if category_pool.len() >= DISTRACTOR_COUNT {
        category_pool
    } else {
        all_descriptions.iter().filter(|d| d.as_str() != correct).collect()
    };

    if pool.is_empty() {
        return EMPTY_POOL_DISTRACTORS.iter().map(|s| s.to_string()).collect();
    }

    let mut out: Vec<String> = Vec::with_capacity(DISTRACTOR_COUNT);
    let mut idx = stable_index(sign_key, pool.len());
    for _ in 0..DISTRACTOR_COUNT.min(pool.len()) {
        let candidate = pool[idx % pool.len()];
        if !out.contains(candidate) {
            out.push(candidate.clone());
        }
        idx += DISTRACTOR_STRIDE;
    }
    while out.len() < DISTRACTOR_COUNT {
        out.push(PADDING_DISTRACTORS[out.len()].to_string());
    }
    out
}

/// 選択肢を左に回転し、正答の位置を返す
pub fn rotate_options(sign_key: &str, correct: &str, distractors: &[String]) -> (Vec<String>, usize) {
    let mut options = Vec::with_capacity(distractors.len() + 1);
    options.push(correct.to_string());
    options.extend(distractors.iter().cloned());

    let seed = format!("{}{}", sign_key, OPTION_SEED_SUFFIX);
    let rotate = stable_index(&seed, options.len());
    options.rotate_left(rotate);

    let correct_index = options.iter().position(|o| o == correct).unwrap_or(0);
    (options, correct_index)
}

/// 問題文
///
/// 末尾の " signs" は単数形にする（"Warning signs" → "warning sign"）。
pub fn question_text(category: &str) -> String {
    let mut label = category.trim().to_string();
    if label.to_lowercase().ends_with(" signs") {
        label.pop();
    }
    format!("You see this {} on the road. What does it mean?", label.to_lowercase())
}

/// 解説文
pub fn explanation(description: &str, driver_action: &str) -> String {
    format!(
        "This sign means: {} Correct response: {}",
        to_sentence(description),
        to_sentence(driver_action)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pools(entries: &[(&str, &str)]) -> DescriptionPools {
        let mut pools = DescriptionPools::new();
        for (category, description) in entries {
            pools.add(category, description);
        }
        pools
    }

    #[test]
    fn test_stable_index_range_and_purity() {
        for size in 1..20 {
            let a = stable_index("sign-42", size);
            assert!(a < size);
            assert_eq!(a, stable_index("sign-42", size));
        }
        assert_eq!(stable_index("anything", 0), 0);
        // 'a' = 97, 'b' = 98
        assert_eq!(stable_index("ab", 10), 5);
    }

    #[test]
    fn test_pools_keep_first_seen_order() {
        let p = pools(&[("W", "a"), ("R", "x"), ("W", "b"), ("W", "a"), ("R", "")]);
        assert_eq!(p.category("W"), ["a".to_string(), "b".to_string()]);
        assert_eq!(p.all(), vec!["a", "b", "x"]);
        assert!(p.category("missing").is_empty());
    }

    #[test]
    fn test_category_pool_preferred() {
        let p = pools(&[("W", "a"), ("W", "b"), ("W", "c"), ("W", "d"), ("R", "x")]);
        let all = p.all();
        let out = pick_distractors("k", "a", "W", &p, &all);
        assert_eq!(out.len(), 3);
        assert!(!out.contains(&"a".to_string()));
        assert!(!out.contains(&"x".to_string()));
    }

    #[test]
    fn test_stride_walk() {
        let p = pools(&[("W", "a"), ("W", "b"), ("W", "c"), ("W", "d"), ("W", "e")]);
        let all = p.all();
        // pool = [b, c, d, e]; 'k' = 107 -> 107 % 4 = 3
        let out = pick_distractors("k", "a", "W", &p, &all);
        // 3 -> e, 10 % 4 = 2 -> d, 17 % 4 = 1 -> c
        assert_eq!(out, vec!["e", "d", "c"]);
    }

    #[test]
    fn test_global_pool_fallback() {
        let p = pools(&[("W", "a"), ("W", "b"), ("R", "x"), ("R", "y")]);
        let all = p.all();
        let out = pick_distractors("k", "a", "W", &p, &all);
        assert_eq!(out.len(), 3);
        assert!(!out.contains(&"a".to_string()));
        assert!(out.iter().all(|d| ["b", "x", "y"].contains(&d.as_str())));
    }

    #[test]
    fn test_empty_pool_filler() {
        let p = pools(&[("W", "a")]);
        let all = p.all();
        let out = pick_distractors("k", "a", "W", &p, &all);
        assert_eq!(out, EMPTY_POOL_DISTRACTORS.to_vec());
    }

    #[test]
    fn test_padding_is_positional() {
        let p = pools(&[("W", "a"), ("W", "b")]);
        let all = p.all();
        let out = pick_distractors("k", "a", "W", &p, &all);
        assert_eq!(out, vec!["b", PADDING_DISTRACTORS[1], PADDING_DISTRACTORS[2]]);
    }

    #[test]
    fn test_rotation_is_permutation() {
        let distractors: Vec<String> = vec!["x".into(), "y".into(), "z".into()];
        for key in ["sign-1", "sign-2", "sign-3", "sign-4"] {
            let (options, idx) = rotate_options(key, "a", &distractors);
            assert_eq!(options.len(), 4);
            assert_eq!(options[idx], "a");
            let mut sorted = options.clone();
            sorted.sort();
            assert_eq!(sorted, vec!["a", "x", "y", "z"]);
        }
    }

    #[test]
    fn test_rotation_offset() {
        let distractors: Vec<String> = vec!["x".into(), "y".into(), "z".into()];
        let offset = stable_index("sign-1::opt", 4);
        let (options, idx) = rotate_options("sign-1", "a", &distractors);
        assert_eq!(idx, (4 - offset) % 4);
        assert_eq!(options[0], ["a", "x", "y", "z"][offset]);
    }

    #[test]
    fn test_question_text() {
        assert_eq!(
            question_text(" Warning signs "),
            "You see this warning sign on the road. What does it mean?"
        );
        assert_eq!(
            question_text("On-street Parking"),
            "You see this on-street parking on the road. What does it mean?"
        );
    }

    #[test]
    fn test_explanation() {
        assert_eq!(
            explanation("No entry", "Do not enter."),
            "This sign means: No entry. Correct response: Do not enter."
        );
    }
}
