//! 対話式セッション
//!
//! 診断 → ユーザー情報入力 → AI相談 → 商品選択 / もっと見る を
//! メニューから繰り返し操作する。状態遷移はすべて `Session::handle` に任せる。

use crate::ai_provider::AiProvider;
use crate::config::Config;
use crate::diagnose::ask_question;
use crate::error::{Result, StylingAiError};
use crate::generator;
use crate::report;
use dialoguer::{Input, Select};
use styling_ai_common::prompts::{IMPRESSION_RANGE, MAX_BUDGET};
use styling_ai_common::{
    format_price, Catalog, ColorCategory, DiagnosisState, ProductCategory, Session, SessionEvent,
    Update, UserProfile, FACE_SHAPES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Diagnose,
    ResetDiagnosis,
    EditProfile,
    Consult,
    SelectProduct,
    ShowMore,
    Quit,
}

impl MenuAction {
    fn label(&self) -> &'static str {
        match self {
            MenuAction::Diagnose => "パーソナルカラー診断",
            MenuAction::ResetDiagnosis => "診断をリセット",
            MenuAction::EditProfile => "ユーザー情報を入力",
            MenuAction::Consult => "AIにスタイリングを相談する",
            MenuAction::SelectProduct => "商品を選ぶ",
            MenuAction::ShowMore => "もっと見る（カテゴリの開閉）",
            MenuAction::Quit => "終了",
        }
    }
}

/// 現在の状態で選べる操作
fn menu_actions(session: &Session) -> Vec<MenuAction> {
    let mut actions = Vec::new();
    match session.diagnosis().state() {
        DiagnosisState::Idle => actions.push(MenuAction::Diagnose),
        DiagnosisState::Asking(_) | DiagnosisState::Scored(_) => actions.push(MenuAction::ResetDiagnosis),
    }
    actions.push(MenuAction::EditProfile);
    actions.push(MenuAction::Consult);
    if session.recommendation().is_some_and(|r| !r.products.is_empty()) {
        actions.push(MenuAction::SelectProduct);
    }
    if session.personal_color().is_some() {
        actions.push(MenuAction::ShowMore);
    }
    actions.push(MenuAction::Quit);
    actions
}

/// イベントを適用し、通知を表示して新しいセッションを返す
fn apply(session: Session, event: SessionEvent, catalog: &Catalog) -> (Session, bool) {
    let Update { session, redraw, notice } = session.handle(event, catalog);
    if let Some(notice) = notice {
        println!("{}", notice);
    }
    (session, redraw)
}

/// セッションの状態を表示
pub fn render(session: &Session, catalog: &Catalog) {
    println!();
    match session.personal_color() {
        Some(color) => println!("🎨 パーソナルカラー: {}（背景色 {}）", color, session.background_color()),
        None => println!("🎨 パーソナルカラー: 未設定"),
    }

    if let Some(recommendation) = session.recommendation() {
        println!();
        report::print_recommendation(recommendation);

        let selections = session.selections();
        if !selections.is_empty() {
            println!("🛒 選択中の商品");
            for (category, p) in &selections {
                println!("  {}: {} ({})", category, p.product.name, format_price(p.product.price));
            }
            println!("  合計: {}", format_price(Some(session.selection_total())));
        }
    }

    if let (Some(category), Some(color), Some(products)) =
        (session.show_more(), session.personal_color(), session.alternatives(catalog))
    {
        println!();
        report::print_alternatives(category, color, &products);
    }
    println!();
}

/// 対話式セッションを実行
pub async fn run_session(catalog: &Catalog, provider: AiProvider, config: &Config) -> Result<()> {
    let mut session = Session::new();
    render(&session, catalog);

    loop {
        let actions = menu_actions(&session);
        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
        let index = Select::new()
            .with_prompt("操作を選択")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(|e| StylingAiError::CliExecution(e.to_string()))?;

        let (next, redraw) = match actions[index] {
            MenuAction::Diagnose => run_diagnosis(session, catalog)?,
            MenuAction::ResetDiagnosis => apply(session, SessionEvent::ResetDiagnosis, catalog),
            MenuAction::EditProfile => {
                let profile = prompt_profile(session.profile())?;
                apply(session, SessionEvent::SetProfile(profile), catalog)
            }
            MenuAction::Consult => consult(session, catalog, provider, config).await,
            MenuAction::SelectProduct => match prompt_selection(&session)? {
                Some((category, index)) => {
                    apply(session, SessionEvent::Select { category, index }, catalog)
                }
                None => (session, false),
            },
            MenuAction::ShowMore => {
                let category = prompt_category("カテゴリを選択")?;
                apply(session, SessionEvent::ToggleShowMore(category), catalog)
            }
            MenuAction::Quit => break,
        };

        session = next;
        if redraw {
            render(&session, catalog);
        }
    }

    println!("✅ 終了");
    Ok(())
}

fn run_diagnosis(session: Session, catalog: &Catalog) -> Result<(Session, bool)> {
    let (mut session, _) = apply(session, SessionEvent::StartDiagnosis, catalog);

    while let Some(choice) = ask_question(session.diagnosis())? {
        let (next, _) = apply(session, SessionEvent::Answer(choice), catalog);
        session = next;
    }

    Ok((session, true))
}

async fn consult(
    session: Session,
    catalog: &Catalog,
    provider: AiProvider,
    config: &Config,
) -> (Session, bool) {
    let prompt = match session.consultation_prompt(catalog) {
        Ok(prompt) => prompt,
        Err(notice) => {
            println!("{}", notice);
            return (session, false);
        }
    };

    let event = match generator::generate_with_spinner(provider, config, &prompt).await {
        Ok(reply) => SessionEvent::ReplyReceived(reply),
        Err(e) => SessionEvent::GenerationFailed(e.to_string()),
    };
    apply(session, event, catalog)
}

fn prompt_profile(current: &UserProfile) -> Result<UserProfile> {
    let cli_err = |e: dialoguer::Error| StylingAiError::CliExecution(e.to_string());

    let color_default = current
        .personal_color
        .and_then(|c| ColorCategory::ALL.iter().position(|x| *x == c))
        .unwrap_or(0);
    let color_labels: Vec<&str> = ColorCategory::ALL.iter().map(|c| c.label()).collect();
    let color_index = Select::new()
        .with_prompt("パーソナルカラー")
        .items(&color_labels)
        .default(color_default)
        .interact()
        .map_err(cli_err)?;

    let face_default = FACE_SHAPES
        .iter()
        .position(|f| *f == current.face_shape)
        .unwrap_or(0);
    let face_index = Select::new()
        .with_prompt("顔の形")
        .items(FACE_SHAPES)
        .default(face_default)
        .interact()
        .map_err(cli_err)?;

    let budget: u32 = Input::new()
        .with_prompt(format!("メイク用品の予算（円, 0-{}）", MAX_BUDGET))
        .default(current.budget)
        .validate_with(|v: &u32| {
            if *v <= MAX_BUDGET {
                Ok(())
            } else {
                Err(format!("{}円以下で入力してください", MAX_BUDGET))
            }
        })
        .interact_text()
        .map_err(cli_err)?;

    let cute_cool = prompt_impression("かわいい(-5) ↔ かっこいい(+5)", current.cute_cool)?;
    let fresh_mature = prompt_impression("フレッシュ(-5) ↔ 大人っぽい(+5)", current.fresh_mature)?;

    let free_text: String = Input::new()
        .with_prompt("その他、具体的なイメージ（空欄可）")
        .with_initial_text(current.free_text.clone())
        .allow_empty(true)
        .interact_text()
        .map_err(cli_err)?;

    Ok(UserProfile {
        personal_color: Some(ColorCategory::ALL[color_index]),
        face_shape: FACE_SHAPES[face_index].to_string(),
        budget,
        cute_cool,
        fresh_mature,
        free_text: free_text.trim().to_string(),
    })
}

fn prompt_impression(label: &str, current: i8) -> Result<i8> {
    Input::new()
        .with_prompt(label)
        .default(current)
        .validate_with(|v: &i8| {
            if IMPRESSION_RANGE.contains(v) {
                Ok(())
            } else {
                Err("-5から5の範囲で入力してください")
            }
        })
        .interact_text()
        .map_err(|e| StylingAiError::CliExecution(e.to_string()))
}

fn prompt_category(prompt: &str) -> Result<ProductCategory> {
    let labels: Vec<&str> = ProductCategory::ALL.iter().map(|c| c.label()).collect();
    let index = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| StylingAiError::CliExecution(e.to_string()))?;
    Ok(ProductCategory::ALL[index])
}

/// 提案されたカテゴリと商品を選ばせる
fn prompt_selection(session: &Session) -> Result<Option<(ProductCategory, usize)>> {
    let Some(recommendation) = session.recommendation() else {
        return Ok(None);
    };
    let categories: Vec<ProductCategory> = recommendation.products.categories().collect();
    if categories.is_empty() {
        return Ok(None);
    }

    let labels: Vec<&str> = categories.iter().map(|c| c.label()).collect();
    let category_index = Select::new()
        .with_prompt("カテゴリを選択")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| StylingAiError::CliExecution(e.to_string()))?;
    let category = categories[category_index];

    let products = recommendation.products.get(category);
    let items: Vec<String> = products
        .iter()
        .map(|p| p.product.display_label())
        .collect();
    let current = session
        .selections()
        .iter()
        .find(|(c, _)| *c == category)
        .and_then(|(_, selected)| products.iter().position(|p| p.product.key() == selected.product.key()))
        .unwrap_or(0);
    let index = Select::new()
        .with_prompt(format!("{}の商品を選択", category))
        .items(&items)
        .default(current)
        .interact()
        .map_err(|e| StylingAiError::CliExecution(e.to_string()))?;

    Ok(Some((category, index)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use styling_ai_common::AnswerChoice;

    fn catalog() -> Catalog {
        Catalog::from_csv_str(
            "商品名,ブランド名,価格,特徴,推奨パーソナルカラー,商品カテゴリ\n\
             リップA,ブランドX,1500,ツヤ,イエベ春,リップメイク\n",
        )
        .unwrap()
    }

    #[test]
    fn test_menu_before_diagnosis() {
        let actions = menu_actions(&Session::new());
        assert_eq!(actions.first(), Some(&MenuAction::Diagnose));
        assert!(!actions.contains(&MenuAction::SelectProduct));
        assert!(!actions.contains(&MenuAction::ShowMore));
        assert_eq!(actions.last(), Some(&MenuAction::Quit));
    }

    #[test]
    fn test_menu_after_reply() {
        let catalog = catalog();
        let mut session = Session::new();
        for event in [
            SessionEvent::StartDiagnosis,
            SessionEvent::Answer(AnswerChoice::A),
            SessionEvent::Answer(AnswerChoice::A),
            SessionEvent::Answer(AnswerChoice::A),
            SessionEvent::Answer(AnswerChoice::A),
            SessionEvent::ReplyReceived(
                "### リップメイク\n* **商品名**: リップA, **ブランド**: ブランドX, **おすすめ理由**: 明るい".into(),
            ),
        ] {
            session = apply(session, event, &catalog).0;
        }

        let actions = menu_actions(&session);
        assert_eq!(actions.first(), Some(&MenuAction::ResetDiagnosis));
        assert!(actions.contains(&MenuAction::SelectProduct));
        assert!(actions.contains(&MenuAction::ShowMore));
    }

    #[test]
    fn test_apply_rejected_does_not_redraw() {
        let catalog = catalog();
        let (session, redraw) = apply(Session::new(), SessionEvent::Answer(AnswerChoice::B), &catalog);
        assert!(!redraw);
        assert_eq!(session, Session::new());
    }
}
