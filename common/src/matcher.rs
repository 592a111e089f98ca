//! カタログ照合モジュール
//!
//! パーサーが抽出した商品言及をカタログの行に解決する。
//! カタログにない商品はAIの誤生成として黙って除外する。

use crate::catalog::Catalog;
use crate::parser::{parse_hairstyle, parse_recommendation_response, ParsedMention};
use crate::types::{Recommendation, RecommendationSet, RecommendedProduct};
use std::collections::HashSet;

/// 商品言及をカタログ照合し、提案商品リストを返す
///
/// - 商品名・ブランド名の完全一致（前後空白除く）で照合
/// - 複数行が一致した場合はカタログ順で先頭
/// - カテゴリはカタログの値ではなくパーサーの正規化結果を使う
/// - 同じ (商品名, ブランド) は1件のみ
pub fn match_mentions(mentions: &[ParsedMention], catalog: &Catalog) -> Vec<RecommendedProduct> {
    let mut matched = Vec::new();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();

    for mention in mentions {
        let Some(product) = catalog.find(&mention.name, &mention.brand) else {
            tracing::debug!(name = %mention.name, brand = %mention.brand, "カタログにない商品を除外");
            continue;
        };

        if !seen.insert(product.key()) {
            continue;
        }

        matched.push(RecommendedProduct {
            product: product.clone(),
            reason: mention.reason.clone(),
            recommended_category: mention.category,
        });
    }

    matched
}

/// 商品言及をカテゴリ別の提案セットにまとめる
pub fn build_recommendation_set(mentions: &[ParsedMention], catalog: &Catalog) -> RecommendationSet {
    RecommendationSet::from_products(match_mentions(mentions, catalog))
}

/// AI応答全体を解析してカタログ照合済みの提案を返す
pub fn recommend_from_response(response: &str, catalog: &Catalog) -> Recommendation {
    let mentions = parse_recommendation_response(response);
    let products = build_recommendation_set(&mentions, catalog);
    tracing::info!(
        mentioned = mentions.len(),
        matched = products.len(),
        "AI提案をカタログ照合"
    );

    Recommendation {
        hairstyle: parse_hairstyle(response),
        products,
    }
}
