//! パーソナルカラー診断（CLI）

use crate::error::{Result, StylingAiError};
use dialoguer::Select;
use styling_ai_common::diagnosis::QUESTION_COUNT;
use styling_ai_common::{AnswerChoice, ColorCategory, DiagnosisState, QuestionnaireEngine};

/// 回答文字列（例: "ABCD"）から診断
pub fn diagnose_from_answers(answers: &str) -> Result<ColorCategory> {
    let choices = AnswerChoice::parse_sequence(answers)
        .map_err(|e| StylingAiError::InvalidInput(e.to_string()))?;
    if choices.len() != QUESTION_COUNT {
        return Err(StylingAiError::InvalidInput(format!(
            "回答は{}つ必要です（指定: {}つ）",
            QUESTION_COUNT,
            choices.len()
        )));
    }

    let mut engine = QuestionnaireEngine::new();
    engine
        .start()
        .map_err(|e| StylingAiError::InvalidInput(e.to_string()))?;
    for choice in choices {
        engine
            .answer(choice)
            .map_err(|e| StylingAiError::InvalidInput(e.to_string()))?;
    }

    engine
        .result()
        .ok_or_else(|| StylingAiError::InvalidInput("診断が完了していません".into()))
}

/// 1問ずつ選択肢を表示して回答させる
pub fn ask_question(engine: &QuestionnaireEngine) -> Result<Option<AnswerChoice>> {
    let Some(question) = engine.current_question() else {
        return Ok(None);
    };

    let index = Select::new()
        .with_prompt(question.text)
        .items(&question.options)
        .default(0)
        .interact()
        .map_err(|e| StylingAiError::CliExecution(e.to_string()))?;

    Ok(AnswerChoice::from_index(index))
}

/// 対話式で診断
pub fn run_interactive_diagnosis() -> Result<ColorCategory> {
    let mut engine = QuestionnaireEngine::new();
    engine
        .start()
        .map_err(|e| StylingAiError::InvalidInput(e.to_string()))?;

    while let DiagnosisState::Asking(n) = engine.state() {
        println!("[{}/{}]", n, QUESTION_COUNT);
        let Some(choice) = ask_question(&engine)? else {
            break;
        };
        engine
            .answer(choice)
            .map_err(|e| StylingAiError::InvalidInput(e.to_string()))?;
    }

    engine
        .result()
        .ok_or_else(|| StylingAiError::InvalidInput("診断が完了していません".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnose_from_answers() {
        assert_eq!(diagnose_from_answers("ABCD").unwrap(), ColorCategory::SpringWarm);
        assert!(diagnose_from_answers("d d d d").unwrap_err().to_string().contains("無効な回答"));
        assert_eq!(diagnose_from_answers("DDDD").unwrap(), ColorCategory::WinterCool);
    }

    #[test]
    fn test_diagnose_requires_four_answers() {
        let err = diagnose_from_answers("ABC").unwrap_err();
        assert!(matches!(err, StylingAiError::InvalidInput(_)));
        assert!(diagnose_from_answers("ABCDA").is_err());
    }
}
