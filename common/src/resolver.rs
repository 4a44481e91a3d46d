//! 候補画像の解決
//!
//! 同名ファイルが複数フォルダにある場合、カタログ行のカテゴリから
//! 1枚を決定的に選ぶ。

use crate::types::CandidateImage;

/// 主カテゴリ一致の加点
pub const PRIMARY_BONUS: i64 = 8;
/// 優先カテゴリ一致の加点（主カテゴリ一致と加算）
pub const PREFERRED_BONUS: i64 = 5;

/// 候補のスコア
///
/// カテゴリ一致の加点からフルパスの文字数を引く。
pub fn score_candidate(candidate: &CandidateImage, preferred: &[String]) -> i64 {
    let mut score = 0;
    if let Some(primary) = preferred.first() {
        if candidate.folder_slug == *primary {
            score += PRIMARY_BONUS;
        }
        if preferred.iter().any(|slug| *slug == candidate.folder_slug) {
            score += PREFERRED_BONUS;
        }
    }
    score - candidate.path_len() as i64
}

/// 候補から1枚を選ぶ
///
/// 候補なしは None。同点は入力順で先のものが勝つ。
pub fn choose_candidate<'a>(
    candidates: &'a [CandidateImage],
    preferred: &[String],
) -> Option<&'a CandidateImage> {
    match candidates {
        [] => None,
        [only] => Some(only),
        _ => {
            let mut ranked: Vec<(i64, &CandidateImage)> = candidates
                .iter()
                .map(|c| (score_candidate(c, preferred), c))
                .collect();
            // 安定ソート（降順）
            ranked.sort_by(|a, b| b.0.cmp(&a.0));
            ranked.first().map(|(_, c)| *c)
        }
    }
}
