//! セッション状態
//!
//! 1ユーザー分の状態（診断・ユーザー情報・提案・選択・「もっと見る」）を
//! 1つの値として保持する。各操作は `Session::handle` に渡し、
//! 更新後のセッションと再描画の要否を受け取る。
//!
//! セッション間で共有しない前提のため同期はしない。

use crate::catalog::Catalog;
use crate::diagnosis::{AnswerChoice, DiagnosisState, QuestionnaireEngine};
use crate::filter::filter_alternatives;
use crate::matcher::recommend_from_response;
use crate::prompts::{build_styling_prompt, UserProfile};
use crate::types::{
    ColorCategory, Product, ProductCategory, Recommendation, RecommendedProduct,
    DEFAULT_BACKGROUND_COLOR,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// ユーザー操作
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// 診断を開始
    StartDiagnosis,
    /// 現在の質問に回答
    Answer(AnswerChoice),
    /// 診断をリセット
    ResetDiagnosis,
    /// ユーザー情報を更新
    SetProfile(UserProfile),
    /// AIの応答を受信
    ReplyReceived(String),
    /// AI呼び出しに失敗
    GenerationFailed(String),
    /// カテゴリ内の商品を選択（提案リストの位置）
    Select { category: ProductCategory, index: usize },
    /// 「もっと見る」の開閉
    ToggleShowMore(ProductCategory),
}

/// ユーザーへの通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
    Error(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Info(msg) => write!(f, "{}", msg),
            Notice::Warning(msg) => write!(f, "⚠ {}", msg),
            Notice::Error(msg) => write!(f, "✖ {}", msg),
        }
    }
}

/// `handle` の結果
#[derive(Debug, Clone)]
pub struct Update {
    pub session: Session,
    /// 画面の再描画が必要か
    pub redraw: bool,
    pub notice: Option<Notice>,
}

impl Update {
    fn redraw(session: Session) -> Self {
        Self { session, redraw: true, notice: None }
    }

    fn with_notice(session: Session, notice: Notice) -> Self {
        Self { session, redraw: true, notice: Some(notice) }
    }

    /// 操作を拒否（状態は変更しない）
    fn rejected(session: Session, reason: impl Into<String>) -> Self {
        Self { session, redraw: false, notice: Some(Notice::Warning(reason.into())) }
    }
}

/// 1ユーザー分のセッション
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    diagnosis: QuestionnaireEngine,
    profile: UserProfile,
    recommendation: Option<Recommendation>,
    /// カテゴリ → 提案リスト内の選択位置
    selections: BTreeMap<ProductCategory, usize>,
    /// 「もっと見る」を開いているカテゴリ（同時に1つまで）
    show_more: Option<ProductCategory>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// 操作を適用する
    pub fn handle(mut self, event: SessionEvent, catalog: &Catalog) -> Update {
        match event {
            SessionEvent::StartDiagnosis => match self.diagnosis.start() {
                Ok(_) => Update::redraw(self),
                Err(e) => Update::rejected(self, e.to_string()),
            },

            SessionEvent::Answer(choice) => match self.diagnosis.answer(choice) {
                Ok(DiagnosisState::Scored(color)) => {
                    self.profile.personal_color = Some(color);
                    Update::with_notice(self, Notice::Info(format!("診断結果: {}", color)))
                }
                Ok(_) => Update::redraw(self),
                Err(e) => Update::rejected(self, e.to_string()),
            },

            SessionEvent::ResetDiagnosis => {
                self.diagnosis.reset();
                Update::redraw(self)
            }

            SessionEvent::SetProfile(profile) => {
                self.profile = profile.clamped();
                Update::redraw(self)
            }

            SessionEvent::ReplyReceived(reply) => {
                let recommendation = recommend_from_response(&reply, catalog);
                let empty = recommendation.products.is_empty();

                self.selections = recommendation
                    .products
                    .categories()
                    .map(|c| (c, 0))
                    .collect();
                self.recommendation = Some(recommendation);

                if empty {
                    Update::with_notice(
                        self,
                        Notice::Warning("カタログに一致する商品が見つかりませんでした".into()),
                    )
                } else {
                    Update::redraw(self)
                }
            }

            SessionEvent::GenerationFailed(message) => {
                tracing::warn!(error = %message, "AI呼び出し失敗");
                Update::with_notice(self, Notice::Error(format!("AIの呼び出しに失敗しました: {}", message)))
            }

            SessionEvent::Select { category, index } => {
                let available = self
                    .recommendation
                    .as_ref()
                    .map(|r| r.products.get(category).len())
                    .unwrap_or(0);
                if index >= available {
                    return Update::rejected(self, format!("{}に{}番目の商品はありません", category, index + 1));
                }
                self.selections.insert(category, index);
                Update::redraw(self)
            }

            SessionEvent::ToggleShowMore(category) => {
                self.show_more = if self.show_more == Some(category) {
                    None
                } else {
                    Some(category)
                };
                Update::redraw(self)
            }
        }
    }

    pub fn diagnosis(&self) -> &QuestionnaireEngine {
        &self.diagnosis
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn recommendation(&self) -> Option<&Recommendation> {
        self.recommendation.as_ref()
    }

    /// AIへの相談プロンプト（パーソナルカラー未選択なら警告）
    pub fn consultation_prompt(&self, catalog: &Catalog) -> Result<String, Notice> {
        if self.profile.personal_color.is_none() {
            return Err(Notice::Warning("パーソナルカラーを選択してください。".into()));
        }
        Ok(build_styling_prompt(&self.profile, catalog))
    }

    /// カテゴリで選択中の商品
    pub fn selected(&self, category: ProductCategory) -> Option<&RecommendedProduct> {
        let index = *self.selections.get(&category)?;
        self.recommendation.as_ref()?.products.get(category).get(index)
    }

    /// 選択中の商品（カテゴリ順）
    pub fn selections(&self) -> Vec<(ProductCategory, &RecommendedProduct)> {
        self.selections
            .keys()
            .filter_map(|c| self.selected(*c).map(|p| (*c, p)))
            .collect()
    }

    /// 選択中の商品の合計金額（価格不明は0円扱い）
    pub fn selection_total(&self) -> f64 {
        self.selections()
            .iter()
            .filter_map(|(_, p)| p.product.price)
            .sum()
    }

    /// 「もっと見る」を開いているカテゴリ
    pub fn show_more(&self) -> Option<ProductCategory> {
        self.show_more
    }

    /// 「もっと見る」の候補（開いていない・カラー未設定ならNone）
    pub fn alternatives<'a>(&self, catalog: &'a Catalog) -> Option<Vec<&'a Product>> {
        let category = self.show_more?;
        let color = self.profile.personal_color?;
        Some(filter_alternatives(catalog, category, color))
    }

    /// 提案後はパーソナルカラーの背景色、それ以外は白
    pub fn background_color(&self) -> &'static str {
        match (&self.recommendation, self.profile.personal_color) {
            (Some(_), Some(color)) => color.background_color(),
            _ => DEFAULT_BACKGROUND_COLOR,
        }
    }

    pub fn personal_color(&self) -> Option<ColorCategory> {
        self.profile.personal_color
    }
}
