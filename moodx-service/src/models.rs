use moodx::{AdvisorSuggestion, Context, Language, ParsedResult, Preferences};
use serde::{Deserialize, Serialize};

use crate::render::TabView;

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub text: String,
    #[serde(default)]
    pub language: Language,
    #[serde(default = "default_true")]
    pub include_products: bool,
    /// Echo the raw completion text back for debugging.
    #[serde(default)]
    pub include_raw: bool,
    #[serde(default = "default_true")]
    pub include_advisors: bool,
}

impl RecommendRequest {
    pub fn preferences(&self) -> Preferences {
        Preferences {
            language: self.language,
            include_products: self.include_products,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub request_id: String,
    pub mood: String,
    pub context: Context,
    pub preferences: Preferences,
    pub recommendations: ParsedResult,
    pub tabs: Vec<TabView>,
    pub advisors: Vec<AdvisorSuggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParseRequest {
    pub raw: String,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub recommendations: ParsedResult,
    pub tabs: Vec<TabView>,
}
