//! 「もっと見る」用の候補抽出

use crate::catalog::Catalog;
use crate::types::{ColorCategory, Product, ProductCategory};
use std::cmp::Ordering;
use std::collections::HashSet;

/// 候補の最大件数
pub const MAX_ALTERNATIVES: usize = 5;

/// 該当商品がない場合の表示
pub const NO_MATCHING_ITEMS: &str = "該当する商品がありません";

/// カテゴリとパーソナルカラーに合う商品を価格の安い順に返す
///
/// - カテゴリが一致し、推奨カラーに指定色または全タイプを含む行が対象
/// - (商品名, ブランド) で重複除去（カタログ順で先頭を残す）
/// - 価格不明は最後
/// - 最大 `MAX_ALTERNATIVES` 件
///
/// 提案済みの商品は除外しない。
pub fn filter_alternatives(
    catalog: &Catalog,
    category: ProductCategory,
    color: ColorCategory,
) -> Vec<&Product> {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut candidates: Vec<&Product> = catalog
        .rows()
        .iter()
        .filter(|p| p.category == Some(category) && p.fits_color(color))
        .filter(|p| seen.insert(p.key()))
        .collect();

    candidates.sort_by(|a, b| compare_price(a.price, b.price));
    candidates.truncate(MAX_ALTERNATIVES);
    candidates
}

/// 価格の昇順（Noneは+∞扱い）
fn compare_price(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
