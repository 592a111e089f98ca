use clap::{Args, Parser, Subcommand};
use crate::ai_provider::AiProvider;
use std::path::PathBuf;
use styling_ai_common::prompts::{DEFAULT_BUDGET, FACE_SHAPES};
use styling_ai_common::{ColorCategory, ProductCategory, UserProfile};

#[derive(Parser)]
#[command(name = "styling-ai")]
#[command(about = "パーソナルカラー診断・メイク/ヘアスタイル提案AIツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// AIプロバイダ（省略時は設定ファイルの値）
    #[arg(long, global = true)]
    pub ai_provider: Option<AiProvider>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 4シーズン・パーソナルカラー診断
    Diagnose {
        /// 回答を一括指定（例: ABCD）。省略時は対話式
        #[arg(short, long)]
        answers: Option<String>,
    },

    /// AIにメイク・ヘアスタイルを相談
    Recommend {
        /// 商品カタログCSV
        #[arg(short, long, default_value = "makeup_products.csv")]
        catalog: PathBuf,

        #[command(flatten)]
        profile: ProfileArgs,

        /// AIを呼ばず、保存済みの応答テキストを解析
        #[arg(long)]
        reply: Option<PathBuf>,

        /// プロンプトを表示するだけ（AIを呼ばない）
        #[arg(long)]
        dry_run: bool,

        /// 結果JSONの出力先
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// カテゴリ・パーソナルカラーに合う商品を価格順に表示（最大5件）
    More {
        /// 商品カタログCSV
        #[arg(short, long, default_value = "makeup_products.csv")]
        catalog: PathBuf,

        /// 商品カテゴリ（ベースメイク/アイシャドウ/リップメイク/チーク）
        #[arg(long)]
        category: ProductCategory,

        /// パーソナルカラー（イエベ春/イエベ秋/ブルベ夏/ブルベ冬）
        #[arg(long)]
        color: ColorCategory,
    },

    /// 診断から商品選択まで対話式で実行
    Session {
        /// 商品カタログCSV
        #[arg(short, long, default_value = "makeup_products.csv")]
        catalog: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// ユーザー情報の指定
#[derive(Args, Clone, Debug)]
pub struct ProfileArgs {
    /// パーソナルカラー（イエベ春/イエベ秋/ブルベ夏/ブルベ冬）
    #[arg(long)]
    pub color: ColorCategory,

    /// 顔の形（丸顔/面長/卵型/ベース型/逆三角形）
    #[arg(long, default_value = "丸顔", value_parser = parse_face_shape)]
    pub face_shape: String,

    /// メイク用品の予算（円, 0-30000）
    #[arg(short, long, default_value_t = DEFAULT_BUDGET)]
    pub budget: u32,

    /// かわいい(-5) ↔ かっこいい(+5)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true, value_parser = clap::value_parser!(i8).range(-5..=5))]
    pub cute_cool: i8,

    /// フレッシュ(-5) ↔ 大人っぽい(+5)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true, value_parser = clap::value_parser!(i8).range(-5..=5))]
    pub fresh_mature: i8,

    /// その他、具体的なイメージ
    #[arg(long, default_value = "")]
    pub image: String,
}

impl ProfileArgs {
    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            personal_color: Some(self.color),
            face_shape: self.face_shape.clone(),
            budget: self.budget,
            cute_cool: self.cute_cool,
            fresh_mature: self.fresh_mature,
            free_text: self.image.clone(),
        }
        .clamped()
    }
}

fn parse_face_shape(s: &str) -> Result<String, String> {
    if FACE_SHAPES.contains(&s) {
        Ok(s.to_string())
    } else {
        Err(format!("Unknown face shape: {}. Use {}", s, FACE_SHAPES.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recommend_args() {
        let cli = Cli::try_parse_from([
            "styling-ai",
            "recommend",
            "--catalog",
            "items.csv",
            "--color",
            "ブルベ夏",
            "--face-shape",
            "面長",
            "--cute-cool",
            "-3",
            "--reply",
            "reply.md",
        ])
        .unwrap();

        match cli.command {
            Commands::Recommend { catalog, profile, reply, .. } => {
                assert_eq!(catalog, PathBuf::from("items.csv"));
                assert_eq!(reply, Some(PathBuf::from("reply.md")));
                let profile = profile.to_profile();
                assert_eq!(profile.personal_color, Some(ColorCategory::SummerCool));
                assert_eq!(profile.face_shape, "面長");
                assert_eq!(profile.cute_cool, -3);
                assert_eq!(profile.budget, DEFAULT_BUDGET);
            }
            _ => panic!("Expected Recommend"),
        }
    }

    #[test]
    fn test_parse_more_args() {
        let cli = Cli::try_parse_from([
            "styling-ai", "more", "--category", "eye", "--color", "spring-warm",
        ])
        .unwrap();
        match cli.command {
            Commands::More { category, color, .. } => {
                assert_eq!(category, ProductCategory::EyeMakeup);
                assert_eq!(color, ColorCategory::SpringWarm);
            }
            _ => panic!("Expected More"),
        }
    }

    #[test]
    fn test_invalid_face_shape() {
        let result = Cli::try_parse_from([
            "styling-ai", "recommend", "--color", "イエベ春", "--face-shape", "四角",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_slider_out_of_range() {
        let result = Cli::try_parse_from([
            "styling-ai", "recommend", "--color", "イエベ春", "--fresh-mature", "9",
        ]);
        assert!(result.is_err());
    }
}
