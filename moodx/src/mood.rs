use tracing::info;

use crate::client::{CompletionClient, MOOD_MAX_TOKENS};
use crate::error::Result;
use crate::prompt::mood_prompt;

/// Summarize free-text input into a one-sentence mood description.
///
/// Any input is accepted, including an empty string. Client failures are
/// returned unchanged.
pub async fn summarize_mood(client: &dyn CompletionClient, raw_text: &str) -> Result<String> {
    info!(input_chars = raw_text.len(), "Analyzing mood");
    let mood = client.generate(&mood_prompt(raw_text), MOOD_MAX_TOKENS).await?;
    info!(mood = %mood.trim(), "Mood analyzed");
    Ok(mood)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MoodError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Recorder {
        calls: Mutex<Vec<(String, u32)>>,
        reply: Result<String>,
    }

    impl Recorder {
        fn replying(reply: Result<String>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reply,
            }
        }
    }

    #[async_trait]
    impl CompletionClient for Recorder {
        async fn generate(&self, prompt: &str, max_output_tokens: u32) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((prompt.to_string(), max_output_tokens));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(MoodError::Api { status_code, body }) => Err(MoodError::Api {
                    status_code: *status_code,
                    body: body.clone(),
                }),
                Err(e) => Err(MoodError::Network(e.to_string())),
            }
        }
    }

    #[tokio::test]
    async fn sends_instruction_with_small_budget() {
        let client = Recorder::replying(Ok("The user feels adventurous.".into()));
        let mood = summarize_mood(&client, "I'm excited and looking for new adventures!")
            .await
            .unwrap();
        assert_eq!(mood, "The user feels adventurous.");

        let calls = client.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].0,
            "Analyze the mood from this text in one short sentence:\nI'm excited and looking for new adventures!"
        );
        assert_eq!(calls[0].1, 150);
    }

    #[tokio::test]
    async fn accepts_empty_input() {
        let client = Recorder::replying(Ok("Neutral.".into()));
        assert_eq!(summarize_mood(&client, "").await.unwrap(), "Neutral.");
    }

    #[tokio::test]
    async fn propagates_api_errors_unchanged() {
        let client = Recorder::replying(Err(MoodError::Api {
            status_code: 503,
            body: "overloaded".into(),
        }));
        let err = summarize_mood(&client, "meh").await.unwrap_err();
        assert!(matches!(err, MoodError::Api { status_code: 503, .. }));
    }
}
