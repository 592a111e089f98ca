//! 商品・診断結果の型定義
//!
//! CLIとセッション処理で共有される型:
//! - Season / ColorCategory: 4シーズンとパーソナルカラー
//! - ProductCategory: メイクカテゴリ
//! - Product: 商品カタログの1行
//! - RecommendedProduct / RecommendationSet: AI提案をカタログ照合した結果

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// 診断内部で使う4シーズン
///
/// 宣言順が同点時の優先順位（春 > 夏 > 秋 > 冬）を兼ねる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// 同点時の優先順
    pub const PRIORITY: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    pub fn label(&self) -> &'static str {
        match self {
            Season::Spring => "春",
            Season::Summer => "夏",
            Season::Autumn => "秋",
            Season::Winter => "冬",
        }
    }

    pub fn color_category(&self) -> ColorCategory {
        match self {
            Season::Spring => ColorCategory::SpringWarm,
            Season::Summer => ColorCategory::SummerCool,
            Season::Autumn => ColorCategory::AutumnWarm,
            Season::Winter => ColorCategory::WinterCool,
        }
    }
}

/// パーソナルカラー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColorCategory {
    #[serde(rename = "イエベ春")]
    SpringWarm,
    #[serde(rename = "イエベ秋")]
    AutumnWarm,
    #[serde(rename = "ブルベ夏")]
    SummerCool,
    #[serde(rename = "ブルベ冬")]
    WinterCool,
}

impl ColorCategory {
    pub const ALL: [ColorCategory; 4] = [
        ColorCategory::SpringWarm,
        ColorCategory::AutumnWarm,
        ColorCategory::SummerCool,
        ColorCategory::WinterCool,
    ];

    /// カタログ・プロンプトで使う表記
    pub fn label(&self) -> &'static str {
        match self {
            ColorCategory::SpringWarm => "イエベ春",
            ColorCategory::AutumnWarm => "イエベ秋",
            ColorCategory::SummerCool => "ブルベ夏",
            ColorCategory::WinterCool => "ブルベ冬",
        }
    }

    pub fn season(&self) -> Season {
        match self {
            ColorCategory::SpringWarm => Season::Spring,
            ColorCategory::AutumnWarm => Season::Autumn,
            ColorCategory::SummerCool => Season::Summer,
            ColorCategory::WinterCool => Season::Winter,
        }
    }

    /// 画面の背景色
    pub fn background_color(&self) -> &'static str {
        match self.season() {
            Season::Spring => "#FDF5E6",
            Season::Summer => "#F0F8FF",
            Season::Autumn => "#FAFAD2",
            Season::Winter => "#E6E6FA",
        }
    }
}

/// 診断前など、パーソナルカラー未定時の背景色
pub const DEFAULT_BACKGROUND_COLOR: &str = "#FFFFFF";

impl fmt::Display for ColorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ColorCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "イエベ春" | "spring-warm" | "spring" | "春" => Ok(ColorCategory::SpringWarm),
            "イエベ秋" | "autumn-warm" | "autumn" | "秋" => Ok(ColorCategory::AutumnWarm),
            "ブルベ夏" | "summer-cool" | "summer" | "夏" => Ok(ColorCategory::SummerCool),
            "ブルベ冬" | "winter-cool" | "winter" | "冬" => Ok(ColorCategory::WinterCool),
            _ => Err(format!(
                "Unknown color: {}. Use イエベ春, イエベ秋, ブルベ夏, ブルベ冬 (or spring-warm etc.)",
                s
            )),
        }
    }
}

/// メイクカテゴリ
///
/// 宣言順がプロンプト・表示でのセクション順。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProductCategory {
    #[serde(rename = "ベースメイク")]
    BaseMakeup,
    #[serde(rename = "アイシャドウ")]
    EyeMakeup,
    #[serde(rename = "リップメイク")]
    LipMakeup,
    #[serde(rename = "チーク")]
    Cheek,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 4] = [
        ProductCategory::BaseMakeup,
        ProductCategory::EyeMakeup,
        ProductCategory::LipMakeup,
        ProductCategory::Cheek,
    ];

    /// カタログの「商品カテゴリ」列での表記
    pub fn label(&self) -> &'static str {
        match self {
            ProductCategory::BaseMakeup => "ベースメイク",
            ProductCategory::EyeMakeup => "アイシャドウ",
            ProductCategory::LipMakeup => "リップメイク",
            ProductCategory::Cheek => "チーク",
        }
    }

    /// AI応答のセクション見出し（`### ` の後ろ）
    ///
    /// アイメイクだけカタログ表記と異なる。
    pub fn section_heading(&self) -> &'static str {
        match self {
            ProductCategory::EyeMakeup => "アイメイク",
            other => other.label(),
        }
    }

    /// セクション見出しからカテゴリを取得
    pub fn from_section_heading(heading: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.section_heading() == heading)
    }

    /// カタログ列の値を型変換（未知の表記はNone）
    pub fn from_catalog_label(label: &str) -> Option<Self> {
        match label.trim() {
            "ベースメイク" => Some(ProductCategory::BaseMakeup),
            "アイシャドウ" | "アイメイク" => Some(ProductCategory::EyeMakeup),
            "リップメイク" => Some(ProductCategory::LipMakeup),
            "チーク" => Some(ProductCategory::Cheek),
            _ => None,
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ProductCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(category) = Self::from_catalog_label(s) {
            return Ok(category);
        }
        match s.trim().to_lowercase().as_str() {
            "base" | "base-makeup" => Ok(ProductCategory::BaseMakeup),
            "eye" | "eye-makeup" | "eyeshadow" => Ok(ProductCategory::EyeMakeup),
            "lip" | "lip-makeup" => Ok(ProductCategory::LipMakeup),
            "cheek" => Ok(ProductCategory::Cheek),
            _ => Err(format!(
                "Unknown category: {}. Use ベースメイク, アイシャドウ, リップメイク, チーク (or base/eye/lip/cheek)",
                s
            )),
        }
    }
}

/// どのパーソナルカラーにも合うことを示すカタログ上の表記
pub const UNIVERSAL_COLOR_TOKENS: &[&str] = &["全タイプ", "オールシーズン", "全シーズン", "ALL"];

/// 「推奨パーソナルカラー」列の1要素
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColorTag {
    /// 全タイプ対応
    Universal,
    Color(ColorCategory),
    /// 解釈できない表記（そのまま保持）
    Other(String),
}

impl ColorTag {
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if UNIVERSAL_COLOR_TOKENS.iter().any(|t| t.eq_ignore_ascii_case(token)) {
            return ColorTag::Universal;
        }
        ColorCategory::ALL
            .iter()
            .find(|c| c.label() == token)
            .map(|c| ColorTag::Color(*c))
            .unwrap_or_else(|| ColorTag::Other(token.to_string()))
    }

    pub fn matches(&self, color: ColorCategory) -> bool {
        match self {
            ColorTag::Universal => true,
            ColorTag::Color(c) => *c == color,
            ColorTag::Other(_) => false,
        }
    }
}

impl From<String> for ColorTag {
    fn from(s: String) -> Self {
        ColorTag::parse(&s)
    }
}

impl From<ColorTag> for String {
    fn from(tag: ColorTag) -> Self {
        match tag {
            ColorTag::Universal => UNIVERSAL_COLOR_TOKENS[0].to_string(),
            ColorTag::Color(c) => c.label().to_string(),
            ColorTag::Other(s) => s,
        }
    }
}

/// 商品カタログの1行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,                       // 商品名
    pub brand: String,                      // ブランド名
    #[serde(default)]
    pub price: Option<f64>,                 // 価格（数値化できない場合None）
    #[serde(default)]
    pub features: String,                   // 特徴
    #[serde(default)]
    pub recommended_colors: Vec<ColorTag>,  // 推奨パーソナルカラー
    #[serde(default)]
    pub category: Option<ProductCategory>,  // 商品カテゴリ（未知の表記はNone）
    #[serde(default)]
    pub category_label: String,             // 商品カテゴリ（CSVの表記のまま）
}

impl Product {
    /// 一意キー（前後空白を除いた商品名・ブランド名）
    pub fn key(&self) -> (&str, &str) {
        (self.name.trim(), self.brand.trim())
    }

    /// 指定パーソナルカラーに推奨されるか（全タイプ含む）
    pub fn fits_color(&self, color: ColorCategory) -> bool {
        self.recommended_colors.iter().any(|tag| tag.matches(color))
    }

    /// 表示用ラベル: `商品名 (¥1,980)`
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, format_price(self.price))
    }
}

/// AI提案をカタログ照合した商品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedProduct {
    #[serde(flatten)]
    pub product: Product,
    pub reason: String,                     // おすすめ理由
    pub recommended_category: ProductCategory,
}

/// カテゴリ別の提案商品リスト
///
/// 各リストは提案順で、(商品名, ブランド名) の重複を含まない。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationSet {
    groups: BTreeMap<ProductCategory, Vec<RecommendedProduct>>,
}

impl RecommendationSet {
    /// 提案順の商品リストをカテゴリ別にまとめる
    pub fn from_products(products: Vec<RecommendedProduct>) -> Self {
        let mut groups: BTreeMap<ProductCategory, Vec<RecommendedProduct>> = BTreeMap::new();
        for product in products {
            groups
                .entry(product.recommended_category)
                .or_default()
                .push(product);
        }
        Self { groups }
    }

    pub fn get(&self, category: ProductCategory) -> &[RecommendedProduct] {
        self.groups.get(&category).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn categories(&self) -> impl Iterator<Item = ProductCategory> + '_ {
        self.groups.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProductCategory, &[RecommendedProduct])> {
        self.groups.iter().map(|(c, v)| (*c, v.as_slice()))
    }

    /// 全カテゴリの商品数
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// ヘアスタイル提案
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HairstyleSuggestion {
    pub proposal: String,   // 提案
    pub reason: String,     // 理由
}

/// 1回のAI相談の結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(default)]
    pub hairstyle: Option<HairstyleSuggestion>,
    pub products: RecommendationSet,
}

/// 価格表示: `¥1,980`、不明は `価格不明`
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p.is_finite() => {
            let yen = p.round() as i64;
            let digits = yen.abs().to_string();
            let mut grouped = String::new();
            for (i, ch) in digits.chars().enumerate() {
                if i > 0 && (digits.len() - i) % 3 == 0 {
                    grouped.push(',');
                }
                grouped.push(ch);
            }
            if yen < 0 {
                format!("-¥{}", grouped)
            } else {
                format!("¥{}", grouped)
            }
        }
        _ => "価格不明".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_to_color_category() {
        assert_eq!(Season::Spring.color_category(), ColorCategory::SpringWarm);
        assert_eq!(Season::Summer.color_category(), ColorCategory::SummerCool);
        assert_eq!(Season::Autumn.color_category(), ColorCategory::AutumnWarm);
        assert_eq!(Season::Winter.color_category(), ColorCategory::WinterCool);
        for color in ColorCategory::ALL {
            assert_eq!(color.season().color_category(), color);
        }
    }

    #[test]
    fn test_color_category_from_str() {
        assert_eq!("イエベ春".parse::<ColorCategory>().unwrap(), ColorCategory::SpringWarm);
        assert_eq!("summer-cool".parse::<ColorCategory>().unwrap(), ColorCategory::SummerCool);
        assert_eq!("Winter".parse::<ColorCategory>().unwrap(), ColorCategory::WinterCool);
        assert!("選択してください".parse::<ColorCategory>().is_err());
    }

    #[test]
    fn test_background_color() {
        assert_eq!(ColorCategory::SpringWarm.background_color(), "#FDF5E6");
        assert_eq!(ColorCategory::WinterCool.background_color(), "#E6E6FA");
    }

    #[test]
    fn test_product_category_section_heading() {
        assert_eq!(ProductCategory::EyeMakeup.section_heading(), "アイメイク");
        assert_eq!(ProductCategory::EyeMakeup.label(), "アイシャドウ");
        assert_eq!(
            ProductCategory::from_section_heading("アイメイク"),
            Some(ProductCategory::EyeMakeup)
        );
        assert_eq!(ProductCategory::from_section_heading("アイシャドウ"), None);
        assert_eq!(
            ProductCategory::from_catalog_label(" チーク "),
            Some(ProductCategory::Cheek)
        );
        assert_eq!(ProductCategory::from_catalog_label("ネイル"), None);
    }

    #[test]
    fn test_color_tag_parse() {
        assert_eq!(ColorTag::parse("全タイプ"), ColorTag::Universal);
        assert_eq!(ColorTag::parse(" ブルベ夏 "), ColorTag::Color(ColorCategory::SummerCool));
        assert_eq!(ColorTag::parse("ニュートラル"), ColorTag::Other("ニュートラル".into()));
        assert!(ColorTag::Universal.matches(ColorCategory::WinterCool));
        assert!(!ColorTag::Other("x".into()).matches(ColorCategory::WinterCool));
    }

    #[test]
    fn test_product_fits_color() {
        let product = Product {
            name: "リップA".into(),
            brand: "ブランドX".into(),
            recommended_colors: vec![ColorTag::Color(ColorCategory::SpringWarm), ColorTag::Universal],
            ..Default::default()
        };
        assert!(product.fits_color(ColorCategory::SummerCool));

        let limited = Product {
            recommended_colors: vec![ColorTag::Color(ColorCategory::SpringWarm)],
            ..product
        };
        assert!(limited.fits_color(ColorCategory::SpringWarm));
        assert!(!limited.fits_color(ColorCategory::AutumnWarm));
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Some(1980.0)), "¥1,980");
        assert_eq!(format_price(Some(500.0)), "¥500");
        assert_eq!(format_price(Some(1234567.0)), "¥1,234,567");
        assert_eq!(format_price(None), "価格不明");
        assert_eq!(format_price(Some(f64::NAN)), "価格不明");
    }

    #[test]
    fn test_recommendation_set_grouping() {
        let make = |name: &str, category| RecommendedProduct {
            product: Product { name: name.into(), brand: "B".into(), ..Default::default() },
            reason: String::new(),
            recommended_category: category,
        };
        let set = RecommendationSet::from_products(vec![
            make("チークA", ProductCategory::Cheek),
            make("下地A", ProductCategory::BaseMakeup),
            make("チークB", ProductCategory::Cheek),
        ]);

        assert_eq!(set.len(), 3);
        let cheeks: Vec<_> = set.get(ProductCategory::Cheek).iter().map(|p| p.product.name.as_str()).collect();
        assert_eq!(cheeks, vec!["チークA", "チークB"]);
        assert!(set.get(ProductCategory::LipMakeup).is_empty());
        assert_eq!(
            set.categories().collect::<Vec<_>>(),
            vec![ProductCategory::BaseMakeup, ProductCategory::Cheek]
        );
    }

    #[test]
    fn test_recommended_product_serialize() {
        let product = RecommendedProduct {
            product: Product {
                name: "ティント".into(),
                brand: "ブランドY".into(),
                price: Some(1650.0),
                recommended_colors: vec![ColorTag::Universal],
                category: Some(ProductCategory::LipMakeup),
                ..Default::default()
            },
            reason: "血色感が出る".into(),
            recommended_category: ProductCategory::LipMakeup,
        };

        let json = serde_json::to_string(&product).expect("シリアライズ失敗");
        assert!(json.contains("\"name\":\"ティント\""));
        assert!(json.contains("\"recommendedColors\":[\"全タイプ\"]"));
        assert!(json.contains("\"recommendedCategory\":\"リップメイク\""));
        assert!(json.contains("\"reason\":\"血色感が出る\""));
    }
}
