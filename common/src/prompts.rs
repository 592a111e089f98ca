//! プロンプト生成モジュール
//!
//! - UserProfile: ユーザー情報（パーソナルカラー、顔の形、予算、なりたいイメージ）
//! - build_styling_prompt: メイク・髪型提案用プロンプト

use crate::catalog::Catalog;
use crate::types::{ColorCategory, ProductCategory};
use serde::{Deserialize, Serialize};

/// 顔の形の選択肢
pub const FACE_SHAPES: &[&str] = &["丸顔", "面長", "卵型", "ベース型", "逆三角形"];

/// 予算の上限（円）
pub const MAX_BUDGET: u32 = 30000;
/// 予算のデフォルト（円）
pub const DEFAULT_BUDGET: u32 = 15000;
/// イメージスライダーの範囲
pub const IMPRESSION_RANGE: std::ops::RangeInclusive<i8> = -5..=5;

/// 各カテゴリで提案してもらう商品数
pub const PRODUCTS_PER_CATEGORY: usize = 3;

/// ユーザー情報
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub personal_color: Option<ColorCategory>,
    pub face_shape: String,
    pub budget: u32,
    /// かわいい(-5) ↔ かっこいい(+5)
    pub cute_cool: i8,
    /// フレッシュ(-5) ↔ 大人っぽい(+5)
    pub fresh_mature: i8,
    /// その他、具体的なイメージ
    #[serde(default)]
    pub free_text: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            personal_color: None,
            face_shape: FACE_SHAPES[0].to_string(),
            budget: DEFAULT_BUDGET,
            cute_cool: 0,
            fresh_mature: 0,
            free_text: String::new(),
        }
    }
}

impl UserProfile {
    /// 範囲外の値を丸める
    pub fn clamped(mut self) -> Self {
        self.budget = self.budget.min(MAX_BUDGET);
        self.cute_cool = self.cute_cool.clamp(*IMPRESSION_RANGE.start(), *IMPRESSION_RANGE.end());
        self.fresh_mature = self
            .fresh_mature
            .clamp(*IMPRESSION_RANGE.start(), *IMPRESSION_RANGE.end());
        self
    }

    fn to_prompt_lines(&self) -> String {
        let color = self.personal_color.map(|c| c.label()).unwrap_or("未設定");
        let free_text = if self.free_text.trim().is_empty() {
            "なし"
        } else {
            self.free_text.trim()
        };
        format!(
            "- パーソナルカラー: {}\n- 顔の形: {}\n- 予算: ¥{}\n- かわいい(-5) ↔ かっこいい(+5): {}\n- フレッシュ(-5) ↔ 大人っぽい(+5): {}\n- 具体的なイメージ: {}",
            color, self.face_shape, self.budget, self.cute_cool, self.fresh_mature, free_text
        )
    }
}

/// 出力フォーマットの商品セクション部分
fn product_sections_template() -> String {
    ProductCategory::ALL
        .iter()
        .map(|c| {
            format!(
                "### {}\n* **商品名**: [商品名], **ブランド**: [ブランド名], **おすすめ理由**: [理由]\n(ここに商品を{}つ提案)",
                c.section_heading(),
                PRODUCTS_PER_CATEGORY
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// メイク・髪型提案プロンプト生成
///
/// # Arguments
/// * `profile` - ユーザー情報
/// * `catalog` - 商品カタログ（全件をテキスト表で埋め込む）
pub fn build_styling_prompt(profile: &UserProfile, catalog: &Catalog) -> String {
    let profile_lines = profile.to_prompt_lines();
    let catalog_table = catalog.to_prompt_table();
    let sections = product_sections_template();

    format!(
        r#"# 指示: あなたはプロのスタイリストです。以下のユーザー情報と商品リストに基づき、最適な「メイク」と「髪型」を提案してください。

# ユーザー情報:
{profile_lines}

# 提案ルール:
* 予算内で実現できる商品を提案してください。
* 各メイクカテゴリで、商品を**{PRODUCTS_PER_CATEGORY}つ**提案することを基本とします。適切な商品がない場合のみ、それ以下の数でも構いません。
* 商品名とブランド名は商品リストの表記をそのまま使ってください。
* 提案は指定のMarkdownフォーマットに従ってください。

# 商品リスト:
{catalog_table}

## あなたへのトータルスタイリング提案 ✨

### ヘアスタイル
* **提案**: [具体的な髪型を提案]
* **理由**: [理由]

{sections}
"#
    )
}
