//! Personal Styling AI Common Library
//!
//! パーソナルカラー診断、AI応答の解析、商品カタログ照合など
//! UIに依存しないロジックをまとめたライブラリ

pub mod types;
pub mod error;
pub mod catalog;
pub mod diagnosis;
pub mod parser;
pub mod matcher;
pub mod filter;
pub mod prompts;
pub mod session;

pub use types::{
    ColorCategory, ColorTag, HairstyleSuggestion, Product, ProductCategory, Recommendation,
    RecommendationSet, RecommendedProduct, Season, format_price,
};
pub use error::{DiagnosisError, Error, Result};
pub use catalog::Catalog;
pub use diagnosis::{AnswerChoice, DiagnosisState, QuestionnaireEngine, QUESTIONS};
pub use parser::{parse_hairstyle, parse_recommendation_response, ParsedMention};
pub use matcher::{build_recommendation_set, match_mentions, recommend_from_response};
pub use filter::{filter_alternatives, MAX_ALTERNATIVES, NO_MATCHING_ITEMS};
pub use prompts::{build_styling_prompt, UserProfile, FACE_SHAPES};
pub use session::{Notice, Session, SessionEvent, Update};
