//! LLM completion seam.

use anyhow::{Context, Result};
use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient};

const CHAT_MODEL: &str = "gpt-4o-mini";
const SYSTEM_INSTRUCTION: &str = "You are an AI chatbot that assists users.";

/// Produces a completion for a user query, optionally grounded in retrieved
/// context snippets.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, context: &[String], query: &str) -> Result<String>;
}

/// OpenAI-backed completion provider.
pub struct OpenAiCompletionProvider {
    client: OpenAIClient,
    model: String,
}

impl OpenAiCompletionProvider {
    pub fn new(client: OpenAIClient) -> Self {
        Self {
            client,
            model: CHAT_MODEL.to_string(),
        }
    }

    fn system_prompt(context: &[String]) -> String {
        if context.is_empty() {
            return SYSTEM_INSTRUCTION.to_string();
        }

        let mut prompt = String::from(SYSTEM_INSTRUCTION);
        prompt.push_str("\n\nUse the following context where relevant:\n");
        for snippet in context {
            prompt.push_str("- ");
            prompt.push_str(snippet);
            prompt.push('\n');
        }
        prompt
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompletionProvider {
    async fn complete(&self, context: &[String], query: &str) -> Result<String> {
        let request = ChatRequest::new(
            self.model.clone(),
            vec![
                Message::system(Self::system_prompt(context)),
                Message::user(query),
            ],
        );

        let response = self
            .client
            .chat_completion(request)
            .await
            .context("completion request failed")?;

        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_without_context() {
        let prompt = OpenAiCompletionProvider::system_prompt(&[]);
        assert_eq!(prompt, SYSTEM_INSTRUCTION);
    }

    #[test]
    fn test_system_prompt_lists_context() {
        let context = vec!["first snippet".to_string(), "second snippet".to_string()];
        let prompt = OpenAiCompletionProvider::system_prompt(&context);
        assert!(prompt.starts_with(SYSTEM_INSTRUCTION));
        assert!(prompt.contains("- first snippet"));
        assert!(prompt.contains("- second snippet"));
    }
}
