pub mod openai;
pub mod prompt;

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
pub use openai::OpenAiClient;
pub use prompt::{Prompt, TemplateKind, SYSTEM_PROMPT};

/// A hosted model that turns one system + user message pair into one completion.
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

#[async_trait]
impl<C: Completion + ?Sized> Completion for &C {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        (**self).complete(system, user).await
    }
}

/// Wraps extracted page text in the instruction template and asks the model for a page.
pub struct Generator<C> {
    client: C,
    prompt: Prompt,
}

impl<C: Completion> Generator<C> {
    pub fn new(client: C, prompt: Prompt) -> Self {
        Generator { client, prompt }
    }

    /// The first completion, verbatim. No HTML checks, no retries.
    pub async fn generate(&self, content: &str) -> Result<String> {
        let user = self.prompt.render(content);
        info!(input_chars = content.len(), "Requesting page from model");
        let document = self.client.complete(SYSTEM_PROMPT, &user).await?;
        info!(output_chars = document.len(), "Model returned document");
        Ok(document)
    }
}
