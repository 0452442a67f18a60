//! Request orchestration: context → mood → recommendations → advisors.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::agents::{AdvisorSuggestion, agent_suggestions};
use crate::client::{CompletionClient, RECOMMENDATION_MAX_TOKENS};
use crate::context::{Context, Preferences, current_context};
use crate::error::Result;
use crate::mood::summarize_mood;
use crate::parser::{ParsedResult, parse};
use crate::prompt::build_recommendation_prompt;

/// User inputs for one recommendation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodRequest {
    pub text: String,
    #[serde(default)]
    pub preferences: Preferences,
    /// Skip the advisor fan-out when false.
    #[serde(default = "default_true")]
    pub with_advisors: bool,
}

fn default_true() -> bool {
    true
}

impl MoodRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            preferences: Preferences::default(),
            with_advisors: true,
        }
    }
}

/// Everything produced for one request. Only built when both the mood and
/// the recommendation calls succeed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodResponse {
    pub context: Context,
    pub mood: String,
    pub preferences: Preferences,
    pub recommendations: ParsedResult,
    /// Completion text the recommendations were parsed from.
    pub raw: String,
    pub advisors: Vec<AdvisorSuggestion>,
}

/// Runs the pipeline against an injected completion client.
#[derive(Clone)]
pub struct Recommender {
    client: Arc<dyn CompletionClient>,
}

impl Recommender {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &dyn CompletionClient {
        self.client.as_ref()
    }

    pub async fn summarize_mood(&self, raw_text: &str) -> Result<String> {
        summarize_mood(self.client(), raw_text).await
    }

    /// Issue the recommendation call and parse it. Returns the raw text
    /// alongside the parsed result.
    pub async fn generate_recommendations(
        &self,
        context: &Context,
        mood: &str,
        preferences: &Preferences,
    ) -> Result<(String, ParsedResult)> {
        let prompt = build_recommendation_prompt(context, mood, preferences);
        let raw = self
            .client
            .generate(&prompt, RECOMMENDATION_MAX_TOKENS)
            .await?;
        let parsed = parse(&raw);
        for category in parsed.categories() {
            info!(
                category = %category,
                items = parsed.items(category).len(),
                "Parsed category"
            );
        }
        Ok((raw, parsed))
    }

    pub async fn recommend(&self, request: &MoodRequest) -> Result<MoodResponse> {
        self.recommend_with_context(request, current_context()).await
    }

    /// Run the full pipeline with a caller-supplied context.
    ///
    /// A failure in the mood or recommendation step aborts the whole run.
    /// Advisor failures are folded into their suggestion text.
    #[instrument(skip_all, fields(language = %request.preferences.language))]
    pub async fn recommend_with_context(
        &self,
        request: &MoodRequest,
        context: Context,
    ) -> Result<MoodResponse> {
        info!("Starting recommendation run");

        let mood = self.summarize_mood(&request.text).await?;
        let (raw, recommendations) = self
            .generate_recommendations(&context, &mood, &request.preferences)
            .await?;

        let advisors = if request.with_advisors {
            agent_suggestions(self.client(), &mood, &context).await
        } else {
            Vec::new()
        };

        info!(
            items = recommendations.total_items(),
            advisors = advisors.len(),
            "Recommendation run completed"
        );

        Ok(MoodResponse {
            context,
            mood,
            preferences: request.preferences,
            recommendations,
            raw,
            advisors,
        })
    }
}
