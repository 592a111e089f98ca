use clap::Parser;
use styling_ai_common::{filter_alternatives, recommend_from_response};
use styling_ai_rust::{cli, config, diagnose, error, generator, interactive, report};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    // RUST_LOG があればそちらを優先
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;
    let provider = cli.ai_provider.unwrap_or(config.provider);

    match cli.command {
        Commands::Diagnose { answers } => {
            println!("🎨 styling-ai - パーソナルカラー診断\n");

            let color = match answers {
                Some(answers) => diagnose::diagnose_from_answers(&answers)?,
                None => diagnose::run_interactive_diagnosis()?,
            };

            println!("\n✅ あなたのパーソナルカラーは「{}」です（背景色 {}）", color, color.background_color());
        }

        Commands::Recommend { catalog, profile, reply, dry_run, output } => {
            println!("💄 styling-ai - スタイリング提案\n");

            // 1. カタログ読み込み
            println!("[1/3] カタログを読み込み中...");
            let catalog = report::load_catalog(&catalog)?;
            println!("✔ {}件の商品\n", catalog.len());

            let profile = profile.to_profile();
            let prompt = styling_ai_common::build_styling_prompt(&profile, &catalog);

            if dry_run {
                println!("{}", prompt);
                return Ok(());
            }

            // 2. AI応答の取得
            let response = match reply {
                Some(path) => {
                    println!("[2/3] 保存済みの応答を読み込み中...");
                    if !path.exists() {
                        return Err(error::StylingAiError::FileNotFound(path.display().to_string()));
                    }
                    std::fs::read_to_string(&path)?
                }
                None => {
                    println!("[2/3] AIに相談中...");
                    generator::generate_with_spinner(provider, &config, &prompt).await?
                }
            };
            println!("✔ 応答を受信\n");

            // 3. 解析・照合
            println!("[3/3] 応答を解析中...");
            let recommendation = recommend_from_response(&response, &catalog);
            println!("✔ {}件の商品がカタログと一致\n", recommendation.products.len());

            report::print_recommendation(&recommendation);

            if let Some(output) = output {
                report::RecommendationReport::new(&profile, &recommendation).save(&output)?;
                println!("✔ 結果を保存: {}", output.display());
            }

            println!("\n✅ 完了");
        }

        Commands::More { catalog, category, color } => {
            let catalog = report::load_catalog(&catalog)?;
            let products = filter_alternatives(&catalog, category, color);
            report::print_alternatives(category, color, &products);
        }

        Commands::Session { catalog } => {
            println!("💄 styling-ai - 対話モード\n");
            let catalog = report::load_catalog(&catalog)?;
            interactive::run_session(&catalog, provider, &config).await?;
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  プロバイダ: {}", config.provider);
                println!("  モデル: {}", config.model);
                println!("  temperature: {}", config.temperature);
                println!("  APIキー: {}", if config.get_api_key().is_ok() { "設定済み" } else { "未設定" });
                if let Ok(path) = Config::config_path() {
                    println!("  設定ファイル: {}", path.display());
                }
            }
        }
    }

    Ok(())
}
