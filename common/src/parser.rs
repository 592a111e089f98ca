//! AI応答パーサー
//!
//! AIのMarkdown形式の応答から、カテゴリ別の商品提案とヘアスタイル提案を抽出する。
//!
//! ## 文法
//! ```text
//! ### <セクション>            ベースメイク | アイメイク | リップメイク | チーク
//! * **商品名**: <名前>, **ブランド**: <ブランド>, **おすすめ理由**: <理由>
//! ```
//! - 商品名・ブランドは1行内
//! - 理由は複数行可。次の `*` で始まる行、またはセクション末尾で終わる
//! - 文法に合わない行は黙ってスキップする（エラーにしない）

use crate::types::{HairstyleSuggestion, ProductCategory};
use regex::Regex;
use std::collections::HashSet;

const ENTRY_MARKER: &str = "* **商品名**: ";
const BRAND_LABEL: &str = "**ブランド**: ";
const REASON_LABEL: &str = "**おすすめ理由**: ";

const HAIRSTYLE_HEADING: &str = "### ヘアスタイル";
const PROPOSAL_MARKER: &str = "* **提案**: ";
const HAIR_REASON_MARKER: &str = "* **理由**: ";

/// 理由の終端（次の箇条書き行）
const NEXT_BULLET: &str = "\n*";

lazy_static::lazy_static! {
    static ref SECTION_RE: Regex =
        Regex::new(r"### (ベースメイク|アイメイク|リップメイク|チーク)").unwrap();
}

/// 応答から抽出した商品言及
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMention {
    /// セクション見出しから正規化したカテゴリ
    pub category: ProductCategory,
    pub name: String,
    pub brand: String,
    pub reason: String,
}

/// 応答をセクションごとに分割
///
/// 最初のセクション見出しより前のテキストは含まれない。
pub fn split_sections(text: &str) -> Vec<(ProductCategory, &str)> {
    let markers: Vec<(ProductCategory, usize, usize)> = SECTION_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let category = ProductCategory::from_section_heading(caps.get(1)?.as_str())?;
            Some((category, whole.start(), whole.end()))
        })
        .collect();

    markers
        .iter()
        .enumerate()
        .map(|(i, &(category, _, body_start))| {
            let body_end = markers.get(i + 1).map(|m| m.1).unwrap_or(text.len());
            (category, &text[body_start..body_end])
        })
        .collect()
}

/// 商品提案をパース
///
/// 同じ (商品名, ブランド) が複数回出現した場合は最初の1件のみ残す
/// （セクションが異なっても同様）。順序は応答内の出現順。
pub fn parse_recommendation_response(text: &str) -> Vec<ParsedMention> {
    let mut mentions = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for (category, body) in split_sections(text) {
        for mention in parse_section_entries(category, body) {
            let key = (mention.name.clone(), mention.brand.clone());
            if seen.insert(key) {
                mentions.push(mention);
            } else {
                tracing::debug!(name = %mention.name, brand = %mention.brand, "重複した商品をスキップ");
            }
        }
    }

    mentions
}

/// 1セクション内の箇条書きを抽出
fn parse_section_entries(category: ProductCategory, body: &str) -> Vec<ParsedMention> {
    let mut entries = Vec::new();
    let mut pos = 0;

    while let Some(offset) = body[pos..].find(ENTRY_MARKER) {
        let head_start = pos + offset + ENTRY_MARKER.len();
        let line_end = body[head_start..]
            .find('\n')
            .map(|i| head_start + i)
            .unwrap_or(body.len());

        let Some((name, brand, reason_offset)) = parse_entry_head(&body[head_start..line_end]) else {
            tracing::debug!(category = %category, line = &body[head_start..line_end], "書式に合わない行をスキップ");
            pos = head_start;
            continue;
        };

        let reason_start = head_start + reason_offset;
        let reason_end = find_span_end(body, reason_start);

        entries.push(ParsedMention {
            category,
            name: name.trim().to_string(),
            brand: brand.trim().to_string(),
            reason: collapse_lines(&body[reason_start..reason_end]),
        });
        pos = reason_end;
    }

    entries
}

/// 箇条書き1行目から (商品名, ブランド, 理由の開始位置) を取り出す
fn parse_entry_head(head: &str) -> Option<(&str, &str, usize)> {
    let (name, after_name) = split_labeled(head, BRAND_LABEL)?;
    let (brand, reason_head) = split_labeled(after_name, REASON_LABEL)?;
    Some((name, brand, head.len() - reason_head.len()))
}

/// `<値>,<空白1文字><ラベル>` の最初の出現で分割
fn split_labeled<'a>(line: &'a str, label: &str) -> Option<(&'a str, &'a str)> {
    line.match_indices(',').find_map(|(i, _)| {
        let rest = &line[i + 1..];
        let ws = rest.chars().next().filter(|c| c.is_whitespace() && *c != '\n')?;
        rest[ws.len_utf8()..]
            .strip_prefix(label)
            .map(|value| (&line[..i], value))
    })
}

/// `start` 以降で最初の `\n*` の位置（なければ末尾）
fn find_span_end(text: &str, start: usize) -> usize {
    text[start..]
        .find(NEXT_BULLET)
        .map(|i| start + i)
        .unwrap_or(text.len())
}

/// 前後空白を除き、改行を半角スペースに置換
fn collapse_lines(s: &str) -> String {
    s.trim().replace("\r\n", " ").replace('\n', " ")
}

/// ヘアスタイル提案をパース
///
/// `### ヘアスタイル` セクションの `提案` と `理由` を取り出す。
/// `提案` がなければNone。
pub fn parse_hairstyle(text: &str) -> Option<HairstyleSuggestion> {
    let start = text.find(HAIRSTYLE_HEADING)? + HAIRSTYLE_HEADING.len();
    let end = text[start..]
        .find("\n#")
        .map(|i| start + i)
        .unwrap_or(text.len());
    let body = &text[start..end];

    let field = |marker: &str| {
        body.find(marker).map(|i| {
            let value_start = i + marker.len();
            collapse_lines(&body[value_start..find_span_end(body, value_start)])
        })
    };

    let proposal = field(PROPOSAL_MARKER).filter(|p| !p.is_empty())?;
    Some(HairstyleSuggestion {
        proposal,
        reason: field(HAIR_REASON_MARKER).unwrap_or_default(),
    })
}
