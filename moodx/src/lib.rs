pub mod agents;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod mood;
pub mod parser;
pub mod pipeline;
pub mod prompt;
pub mod schema;

// Re-export commonly used types
pub use agents::{AdvisorAgent, AdvisorSuggestion, agent_suggestion, agent_suggestions};
pub use client::{CompletionClient, GroqClient};
pub use config::Config;
pub use context::{Context, Device, Language, Preferences, current_context};
pub use error::{MoodError, Result};
pub use mood::summarize_mood;
pub use parser::{LineMatch, ParsedResult, RecommendationItem, parse};
pub use pipeline::{MoodRequest, MoodResponse, Recommender};
pub use prompt::build_recommendation_prompt;
pub use schema::{CATEGORIES, Category, CategorySchema};
