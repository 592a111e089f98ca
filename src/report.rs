//! 端末表示

use crate::error::{Result, StylingAiError};
use chrono::Local;
use serde::Serialize;
use std::path::Path;
use styling_ai_common::{
    format_price, Catalog, ColorCategory, Product, ProductCategory, Recommendation, UserProfile,
    NO_MATCHING_ITEMS,
};

/// AI提案を表示
pub fn print_recommendation(recommendation: &Recommendation) {
    if let Some(hair) = &recommendation.hairstyle {
        println!("✂️  ヘアスタイル: {}", hair.proposal);
        if !hair.reason.is_empty() {
            println!("   理由: {}", hair.reason);
        }
        println!();
    }

    if recommendation.products.is_empty() {
        println!("⚠ カタログに一致する商品が見つかりませんでした");
        return;
    }

    for (category, products) in recommendation.products.iter() {
        println!("💄 {}", category);
        for (i, p) in products.iter().enumerate() {
            println!("  {}) {} / {} ({})", i + 1, p.product.name, p.product.brand, format_price(p.product.price));
            println!("     おすすめ理由: {}", p.reason);
        }
        println!();
    }
}

/// 「もっと見る」の候補を表示
pub fn print_alternatives(category: ProductCategory, color: ColorCategory, products: &[&Product]) {
    println!("🔍 {} × {} の候補（価格の安い順）", category, color);
    if products.is_empty() {
        println!("  {}", NO_MATCHING_ITEMS);
        return;
    }
    for p in products {
        println!("  - {} / {} ({})", p.name, p.brand, format_price(p.price));
        if !p.features.is_empty() {
            println!("    {}", p.features);
        }
    }
}

/// `recommend --output` で保存するJSON
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationReport<'a> {
    pub generated_at: String,
    pub profile: &'a UserProfile,
    #[serde(flatten)]
    pub recommendation: &'a Recommendation,
}

impl<'a> RecommendationReport<'a> {
    pub fn new(profile: &'a UserProfile, recommendation: &'a Recommendation) -> Self {
        Self {
            generated_at: Local::now().to_rfc3339(),
            profile,
            recommendation,
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// カタログCSVを読み込む
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Err(StylingAiError::FileNotFound(path.display().to_string()));
    }
    let catalog = Catalog::from_csv(path).map_err(|e| StylingAiError::CatalogLoad(e.to_string()))?;
    tracing::info!(path = %path.display(), products = catalog.len(), "カタログ読み込み");
    Ok(catalog)
}
