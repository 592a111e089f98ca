//! 商品カタログモジュール
//!
//! メイク商品のカタログを管理する。
//! CSVから読み込み、AIへのプロンプトに埋め込むテキスト表と
//! 商品名・ブランド名による照合を提供する。

use crate::error::{Error, Result};
use crate::types::{format_price, ColorTag, Product, ProductCategory};
use std::path::Path;

/// CSVの列名（別名を含む）
const NAME_COLUMNS: &[&str] = &["商品名", "name"];
const BRAND_COLUMNS: &[&str] = &["ブランド名", "ブランド", "brand"];
const PRICE_COLUMNS: &[&str] = &["価格", "price"];
const FEATURE_COLUMNS: &[&str] = &["特徴", "features"];
const COLOR_COLUMNS: &[&str] = &["推奨パーソナルカラー", "colors"];
const CATEGORY_COLUMNS: &[&str] = &["商品カテゴリ", "category"];

/// 推奨パーソナルカラー列の区切り文字
const COLOR_DELIMITER: char = ';';

/// 商品カタログ全体
///
/// 行の順序はCSVの順序を保持する（照合時は先頭優先）。
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

/// ヘッダー行から求めた列位置
struct ColumnIndex {
    name: usize,
    brand: usize,
    price: usize,
    features: Option<usize>,
    colors: usize,
    category: usize,
}

impl ColumnIndex {
    fn from_header(header: &[String]) -> Result<Self> {
        let find = |aliases: &[&str]| {
            header
                .iter()
                .position(|h| aliases.iter().any(|a| h.trim().eq_ignore_ascii_case(a)))
        };
        let require = |aliases: &[&str]| {
            find(aliases).ok_or_else(|| Error::Catalog(format!("列「{}」が見つかりません", aliases[0])))
        };

        Ok(Self {
            name: require(NAME_COLUMNS)?,
            brand: require(BRAND_COLUMNS)?,
            price: require(PRICE_COLUMNS)?,
            features: find(FEATURE_COLUMNS),
            colors: require(COLOR_COLUMNS)?,
            category: require(CATEGORY_COLUMNS)?,
        })
    }
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// CSVファイルから読み込み
    pub fn from_csv(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Catalog(format!(
                "CSVファイル '{}' が見つかりません",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_csv_str(&content)
    }

    /// CSV文字列から読み込み（先頭のBOMは無視）
    pub fn from_csv_str(content: &str) -> Result<Self> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut records = parse_csv_records(content).into_iter();

        let (_, header) = records
            .next()
            .ok_or_else(|| Error::Catalog("CSVが空です".into()))?;
        let columns = ColumnIndex::from_header(&header)?;
        let required = [columns.name, columns.brand, columns.price, columns.colors, columns.category]
            .into_iter()
            .max()
            .unwrap_or(0);

        let mut products = Vec::new();
        for (line, fields) in records {
            if fields.len() <= required {
                tracing::warn!(line, fields = fields.len(), "列数が不足している行をスキップ");
                continue;
            }

            let field = |i: usize| fields.get(i).map(|s| s.trim()).unwrap_or_default();
            let category_label = field(columns.category);
            let category = ProductCategory::from_catalog_label(category_label);
            if category.is_none() {
                tracing::debug!(line, category = category_label, "未知の商品カテゴリ");
            }

            products.push(Product {
                name: field(columns.name).to_string(),
                brand: field(columns.brand).to_string(),
                price: parse_price(field(columns.price)),
                features: columns.features.map(field).unwrap_or_default().to_string(),
                recommended_colors: parse_colors(field(columns.colors)),
                category,
                category_label: category_label.to_string(),
            });
        }

        tracing::debug!(products = products.len(), "カタログ読み込み完了");
        Ok(Self { products })
    }

    /// 全商品を取得
    pub fn rows(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// 商品名・ブランド名が一致する最初の商品を検索
    ///
    /// 比較は前後空白を除いた完全一致（大文字小文字を区別）。
    pub fn find(&self, name: &str, brand: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.name.trim() == name && p.brand.trim() == brand)
    }

    /// プロンプト埋め込み用のテキスト表を生成
    pub fn to_prompt_table(&self) -> String {
        let mut lines = vec![format!(
            "{} | {} | {} | {} | {} | {}",
            NAME_COLUMNS[0],
            BRAND_COLUMNS[0],
            PRICE_COLUMNS[0],
            FEATURE_COLUMNS[0],
            COLOR_COLUMNS[0],
            CATEGORY_COLUMNS[0]
        )];

        for product in &self.products {
            let colors = product
                .recommended_colors
                .iter()
                .cloned()
                .map(String::from)
                .collect::<Vec<_>>()
                .join(";");
            lines.push(format!(
                "{} | {} | {} | {} | {} | {}",
                product.name,
                product.brand,
                format_price(product.price),
                product.features,
                colors,
                product
                    .category
                    .map(|c| c.label())
                    .unwrap_or(product.category_label.as_str())
            ));
        }

        lines.join("\n")
    }
}

/// 価格を数値化（数値化できない場合はNone）
fn parse_price(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|p| p.is_finite())
}

/// 推奨パーソナルカラー列を分割
fn parse_colors(value: &str) -> Vec<ColorTag> {
    value
        .split(COLOR_DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ColorTag::parse)
        .collect()
}

/// CSV全体をレコードに分割（ダブルクォート・`""` エスケープ対応）
///
/// クォート内の改行はフィールドの一部として扱う。
/// 空行は読み飛ばし、各レコードには開始行番号（1始まり）を添える。
fn parse_csv_records(content: &str) -> Vec<(usize, Vec<String>)> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            '\n' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
                push_record(&mut records, record_line, std::mem::take(&mut fields));
                line += 1;
                record_line = line;
            }
            '\n' => {
                current.push(c);
                line += 1;
            }
            _ => current.push(c),
        }
    }
    fields.push(current);
    push_record(&mut records, record_line, fields);

    records
}

fn push_record(records: &mut Vec<(usize, Vec<String>)>, line: usize, fields: Vec<String>) {
    if fields.iter().all(|f| f.trim().is_empty()) {
        return;
    }
    records.push((line, fields));
}
