//! 4シーズン・パーソナルカラー診断
//!
//! 4問の回答（A〜D）を集計し、パーソナルカラーを判定する。
//!
//! ## 状態遷移
//! `Idle` → `start()` → `Asking(1)` → `answer()` ×4 → `Scored`
//!
//! `reset()` はどの状態からでも `Idle` に戻す。
//! 事前条件に反する操作は `DiagnosisError` を返し、状態を変更しない。

use crate::error::DiagnosisError;
use crate::types::{ColorCategory, Season};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 質問数
pub const QUESTION_COUNT: usize = 4;

/// 質問文と選択肢
pub static QUESTIONS: [Question; QUESTION_COUNT] = [
    Question {
        text: "Q1. 瞳の色や印象は？",
        options: ["A. 明るい茶色", "B. 深いこげ茶色", "C. ソフトな赤茶/黒", "D. はっきりした黒"],
    },
    Question {
        text: "Q2. 似合うアクセサリーは？",
        options: ["A. 明るいゴールド", "B. マットなゴールド", "C. 優しいシルバー", "D. 輝くシルバー"],
    },
    Question {
        text: "Q3. 肌の質感は？",
        options: ["A. ツヤ・薄め", "B. マット・厚め", "C. サラサラ・マット", "D. ハリがある"],
    },
    Question {
        text: "Q4. 似合うリップの色は？",
        options: ["A. コーラルピンク系", "B. テラコッタ系", "C. ローズピンク系", "D. チェリーレッド系"],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub text: &'static str,
    pub options: [&'static str; 4],
}

/// 回答の選択肢
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerChoice {
    A,
    B,
    C,
    D,
}

impl AnswerChoice {
    pub const ALL: [AnswerChoice; 4] = [AnswerChoice::A, AnswerChoice::B, AnswerChoice::C, AnswerChoice::D];

    /// 回答→シーズン（質問によらず共通）
    pub fn season(&self) -> Season {
        match self {
            AnswerChoice::A => Season::Spring,
            AnswerChoice::B => Season::Autumn,
            AnswerChoice::C => Season::Summer,
            AnswerChoice::D => Season::Winter,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            AnswerChoice::A => 'A',
            AnswerChoice::B => 'B',
            AnswerChoice::C => 'C',
            AnswerChoice::D => 'D',
        }
    }

    /// 選択肢の位置（0..4）から取得
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn from_letter(letter: char) -> Result<Self, DiagnosisError> {
        match letter {
            'A' => Ok(AnswerChoice::A),
            'B' => Ok(AnswerChoice::B),
            'C' => Ok(AnswerChoice::C),
            'D' => Ok(AnswerChoice::D),
            other => Err(DiagnosisError::InvalidChoice(other.to_string())),
        }
    }

    /// `"ABCD"` のような文字列を回答列に変換
    pub fn parse_sequence(s: &str) -> Result<Vec<Self>, DiagnosisError> {
        s.chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(Self::from_letter)
            .collect()
    }
}

impl fmt::Display for AnswerChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for AnswerChoice {
    type Err = DiagnosisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_letter(c),
            _ => Err(DiagnosisError::InvalidChoice(s.to_string())),
        }
    }
}

/// 診断の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DiagnosisState {
    /// 未開始
    #[default]
    Idle,
    /// n問目（1始まり）の回答待ち
    Asking(usize),
    /// 診断完了
    Scored(ColorCategory),
}

/// 診断エンジン
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireEngine {
    state: DiagnosisState,
    answers: Vec<AnswerChoice>,
}

impl QuestionnaireEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DiagnosisState {
        self.state
    }

    pub fn answers(&self) -> &[AnswerChoice] {
        &self.answers
    }

    /// 回答待ちの質問
    pub fn current_question(&self) -> Option<&'static Question> {
        match self.state {
            DiagnosisState::Asking(n) => n.checked_sub(1).and_then(|i| QUESTIONS.get(i)),
            _ => None,
        }
    }

    /// 診断結果（完了時のみ）
    pub fn result(&self) -> Option<ColorCategory> {
        match self.state {
            DiagnosisState::Scored(color) => Some(color),
            _ => None,
        }
    }

    /// 診断を開始する（Idleのみ）
    pub fn start(&mut self) -> Result<DiagnosisState, DiagnosisError> {
        if self.state != DiagnosisState::Idle {
            return Err(DiagnosisError::AlreadyStarted);
        }
        self.answers.clear();
        self.state = DiagnosisState::Asking(1);
        Ok(self.state)
    }

    /// 現在の質問に回答する
    pub fn answer(&mut self, choice: AnswerChoice) -> Result<DiagnosisState, DiagnosisError> {
        let n = match self.state {
            DiagnosisState::Asking(n) => n,
            DiagnosisState::Idle => return Err(DiagnosisError::NotStarted),
            DiagnosisState::Scored(_) => return Err(DiagnosisError::AlreadyScored),
        };

        let mut answers = self.answers.clone();
        answers.push(choice);
        let next = if n < QUESTION_COUNT {
            DiagnosisState::Asking(n + 1)
        } else {
            DiagnosisState::Scored(score(&answers)?)
        };

        self.answers = answers;
        self.state = next;
        Ok(next)
    }

    /// 文字（'A'〜'D'）で回答する
    pub fn answer_letter(&mut self, letter: char) -> Result<DiagnosisState, DiagnosisError> {
        let choice = AnswerChoice::from_letter(letter)?;
        self.answer(choice)
    }

    /// 初期状態に戻す
    pub fn reset(&mut self) {
        self.answers.clear();
        self.state = DiagnosisState::Idle;
    }
}

/// 回答を集計してパーソナルカラーを判定
///
/// 最多のシーズンを採用し、同数の場合は春 > 夏 > 秋 > 冬 の順で先勝ち。
pub fn score(answers: &[AnswerChoice]) -> Result<ColorCategory, DiagnosisError> {
    if answers.len() != QUESTION_COUNT {
        return Err(DiagnosisError::WrongAnswerCount {
            got: answers.len(),
            expected: QUESTION_COUNT,
        });
    }

    let mut tally = [0usize; 4];
    for answer in answers {
        let season = answer.season();
        if let Some(i) = Season::PRIORITY.iter().position(|s| *s == season) {
            tally[i] += 1;
        }
    }

    let mut best = 0;
    for i in 1..tally.len() {
        if tally[i] > tally[best] {
            best = i;
        }
    }

    Ok(Season::PRIORITY[best].color_category())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(letters: &str) -> ColorCategory {
        let mut engine = QuestionnaireEngine::new();
        engine.start().unwrap();
        for c in letters.chars() {
            engine.answer_letter(c).unwrap();
        }
        engine.result().expect("診断が完了していない")
    }

    #[test]
    fn test_state_transitions() {
        let mut engine = QuestionnaireEngine::new();
        assert_eq!(engine.state(), DiagnosisState::Idle);
        assert_eq!(engine.start().unwrap(), DiagnosisState::Asking(1));
        assert_eq!(engine.current_question().unwrap().text, "Q1. 瞳の色や印象は？");
        assert_eq!(engine.answer(AnswerChoice::A).unwrap(), DiagnosisState::Asking(2));
        assert_eq!(engine.answer(AnswerChoice::A).unwrap(), DiagnosisState::Asking(3));
        assert_eq!(engine.answer(AnswerChoice::C).unwrap(), DiagnosisState::Asking(4));
        assert_eq!(
            engine.answer(AnswerChoice::D).unwrap(),
            DiagnosisState::Scored(ColorCategory::SpringWarm)
        );
        assert_eq!(engine.answers().len(), 4);
        assert!(engine.current_question().is_none());
    }

    #[test]
    fn test_tie_breaks_spring_first() {
        assert_eq!(run("ABCD"), ColorCategory::SpringWarm);
        assert_eq!(run("DCBA"), ColorCategory::SpringWarm);
    }

    #[test]
    fn test_tie_priority_summer_over_autumn() {
        // 夏2・秋2 → 夏
        assert_eq!(run("BBCC"), ColorCategory::SummerCool);
        // 秋2・冬2 → 秋
        assert_eq!(run("DDBB"), ColorCategory::AutumnWarm);
    }

    #[test]
    fn test_all_same() {
        assert_eq!(run("DDDD"), ColorCategory::WinterCool);
        assert_eq!(run("BBBB"), ColorCategory::AutumnWarm);
        assert_eq!(run("CCCC"), ColorCategory::SummerCool);
    }

    #[test]
    fn test_majority_wins() {
        assert_eq!(run("DDDA"), ColorCategory::WinterCool);
        assert_eq!(run("BCBA"), ColorCategory::AutumnWarm);
    }

    #[test]
    fn test_all_sequences_are_deterministic() {
        for a in AnswerChoice::ALL {
            for b in AnswerChoice::ALL {
                for c in AnswerChoice::ALL {
                    for d in AnswerChoice::ALL {
                        let seq: String = [a, b, c, d].iter().map(|x| x.letter()).collect();
                        assert_eq!(run(&seq), run(&seq));
                    }
                }
            }
        }
    }

    #[test]
    fn test_answer_before_start_is_rejected() {
        let mut engine = QuestionnaireEngine::new();
        assert_eq!(engine.answer(AnswerChoice::A), Err(DiagnosisError::NotStarted));
        assert_eq!(engine, QuestionnaireEngine::new());
    }

    #[test]
    fn test_answer_after_scored_is_rejected() {
        let mut engine = QuestionnaireEngine::new();
        engine.start().unwrap();
        for _ in 0..4 {
            engine.answer(AnswerChoice::B).unwrap();
        }
        let before = engine.clone();
        assert_eq!(engine.answer(AnswerChoice::A), Err(DiagnosisError::AlreadyScored));
        assert_eq!(engine, before);
    }

    #[test]
    fn test_invalid_letter_is_rejected() {
        let mut engine = QuestionnaireEngine::new();
        engine.start().unwrap();
        let before = engine.clone();
        assert!(matches!(engine.answer_letter('E'), Err(DiagnosisError::InvalidChoice(_))));
        assert!(matches!(engine.answer_letter('a'), Err(DiagnosisError::InvalidChoice(_))));
        assert_eq!(engine, before);
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let mut engine = QuestionnaireEngine::new();
        engine.start().unwrap();
        engine.answer(AnswerChoice::C).unwrap();
        let before = engine.clone();
        assert_eq!(engine.start(), Err(DiagnosisError::AlreadyStarted));
        assert_eq!(engine, before);
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut engine = QuestionnaireEngine::new();
        engine.start().unwrap();
        engine.answer(AnswerChoice::A).unwrap();
        engine.reset();
        assert_eq!(engine.state(), DiagnosisState::Idle);
        assert!(engine.answers().is_empty());

        for _ in 0..4 {
            if engine.state() == DiagnosisState::Idle {
                engine.start().unwrap();
            }
            engine.answer(AnswerChoice::D).unwrap();
        }
        assert!(engine.result().is_some());
        engine.reset();
        assert_eq!(engine.result(), None);
        assert_eq!(engine.start().unwrap(), DiagnosisState::Asking(1));
    }

    #[test]
    fn test_score_requires_four_answers() {
        assert_eq!(
            score(&[AnswerChoice::A, AnswerChoice::B]),
            Err(DiagnosisError::WrongAnswerCount { got: 2, expected: QUESTION_COUNT })
        );
        assert_eq!(
            score(&[AnswerChoice::C; 4]).unwrap(),
            ColorCategory::SummerCool
        );
    }

    #[test]
    fn test_restored_engine_with_zero_step() {
        let engine: QuestionnaireEngine =
            serde_json::from_str(r#"{"state":{"Asking":0},"answers":[]}"#).unwrap();
        assert_eq!(engine.state(), DiagnosisState::Asking(0));
        assert!(engine.current_question().is_none());
    }

    #[test]
    fn test_parse_sequence() {
        assert_eq!(
            AnswerChoice::parse_sequence("A, B C,D").unwrap(),
            vec![AnswerChoice::A, AnswerChoice::B, AnswerChoice::C, AnswerChoice::D]
        );
        assert!(AnswerChoice::parse_sequence("ABX").is_err());
        assert_eq!("C".parse::<AnswerChoice>().unwrap(), AnswerChoice::C);
        assert!("CD".parse::<AnswerChoice>().is_err());
    }
}
