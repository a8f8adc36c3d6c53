use super::api::{GenerateContentRequest, GenerateContentResponse};
use crate::client::Client;
use crate::ChatModel;
use async_trait::async_trait;

/// Chat model bound to one Gemini model name.
pub struct GeminiChatModel {
    client: Client,
    base_url: String,
    model_name: String,
}

impl GeminiChatModel {
    pub fn new(client: Client, base_url: String, model_name: String) -> Self {
        GeminiChatModel {
            client,
            base_url,
            model_name,
        }
    }
}

#[async_trait]
impl ChatModel for GeminiChatModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model_name
        );

        let request = GenerateContentRequest::user_prompt(prompt);
        let response: GenerateContentResponse = self.client.post(url, &request).await?;

        let text = response.text();
        if text.trim().is_empty() {
            anyhow::bail!("model {} returned no text candidates", self.model_name);
        }
        Ok(text.trim().to_string())
    }
}
