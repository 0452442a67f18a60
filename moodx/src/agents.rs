use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

use crate::client::{ADVISOR_MAX_TOKENS, CompletionClient};
use crate::context::Context;
use crate::prompt::advisor_prompt;

/// Advisory personas that each get one short suggestion per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisorAgent {
    DailyPlanner,
    MentalHealthCopilot,
    SocialMediaCurator,
    BudgetFriendlyRecommender,
    FeedbackLearningAgent,
    GeoAwareRecommender,
    GoalAlignmentAgent,
    SentimentEnhancer,
}

impl AdvisorAgent {
    /// Display order.
    pub const ALL: [AdvisorAgent; 8] = [
        AdvisorAgent::DailyPlanner,
        AdvisorAgent::MentalHealthCopilot,
        AdvisorAgent::SocialMediaCurator,
        AdvisorAgent::BudgetFriendlyRecommender,
        AdvisorAgent::FeedbackLearningAgent,
        AdvisorAgent::GeoAwareRecommender,
        AdvisorAgent::GoalAlignmentAgent,
        AdvisorAgent::SentimentEnhancer,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AdvisorAgent::DailyPlanner => "Daily Planner",
            AdvisorAgent::MentalHealthCopilot => "Mental Health Copilot",
            AdvisorAgent::SocialMediaCurator => "Social Media Curator",
            AdvisorAgent::BudgetFriendlyRecommender => "Budget-Friendly Recommender",
            AdvisorAgent::FeedbackLearningAgent => "Feedback Learning Agent",
            AdvisorAgent::GeoAwareRecommender => "Geo-aware Recommender",
            AdvisorAgent::GoalAlignmentAgent => "Goal Alignment Agent",
            AdvisorAgent::SentimentEnhancer => "Sentiment Enhancer",
        }
    }
}

impl fmt::Display for AdvisorAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorSuggestion {
    pub agent: AdvisorAgent,
    pub label: String,
    pub suggestion: String,
    /// Set when `suggestion` is the inline error text rather than model output.
    pub failed: bool,
}

/// Ask one advisor for a suggestion. Never fails: a client error is folded
/// into the returned text.
pub async fn agent_suggestion(
    client: &dyn CompletionClient,
    agent_label: &str,
    mood: &str,
    context: &Context,
) -> String {
    suggest(client, agent_label, mood, context).await.0
}

async fn suggest(
    client: &dyn CompletionClient,
    agent_label: &str,
    mood: &str,
    context: &Context,
) -> (String, bool) {
    let prompt = advisor_prompt(agent_label, mood, context);
    match client.generate(&prompt, ADVISOR_MAX_TOKENS).await {
        Ok(text) => (text, false),
        Err(e) => {
            warn!(agent = %agent_label, error = %e, "Advisor suggestion failed");
            (format!("Error generating recommendation: {e}"), true)
        }
    }
}

/// Ask every advisor concurrently. Results come back in [`AdvisorAgent::ALL`]
/// order and one failure never affects the others.
pub async fn agent_suggestions(
    client: &dyn CompletionClient,
    mood: &str,
    context: &Context,
) -> Vec<AdvisorSuggestion> {
    let calls = AdvisorAgent::ALL.into_iter().map(|agent| async move {
        let (suggestion, failed) = suggest(client, agent.label(), mood, context).await;
        AdvisorSuggestion {
            agent,
            label: agent.label().to_string(),
            suggestion,
            failed,
        }
    });
    let suggestions = join_all(calls).await;

    let failures = suggestions.iter().filter(|s| s.failed).count();
    info!(
        advisors = suggestions.len(),
        failures, "Advisor suggestions collected"
    );
    suggestions
}
