//! HS code classification: prompt construction, upstream call, and reply parsing.

use crate::errors::AppError;
use crate::models::ClassificationResult;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// A text-generation backend that turns a prompt into a text reply.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the first text segment of the model's reply to `prompt`.
    async fn complete(&self, prompt: &str) -> Result<String, AppError>;
}

/// Builds the instruction sent to the model for a single product.
///
/// The description is embedded verbatim.
pub fn build_prompt(product_description: &str) -> String {
    format!(
        r#"You are an expert in tariff classification and HS (Harmonized System) codes. Classify the following product and provide the most likely HS code.

Product Description: {}

Respond ONLY with a valid JSON object (no markdown, no backticks) in this exact format:
{{
  "hs_code": "1234.56.78",
  "description": "Brief description of what this HS code covers",
  "confidence": "high/medium/low",
  "reasoning": "Brief explanation of why this classification applies",
  "chapter": "Chapter number and name",
  "considerations": ["Key factor 1", "Key factor 2", "Key factor 3"]
}}"#,
        product_description
    )
}

/// Removes every ```` ```json ```` and ```` ``` ```` marker and trims the result.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parses the model's reply text into a classification.
pub fn parse_classification(reply: &str) -> Result<ClassificationResult, AppError> {
    let cleaned = strip_code_fences(reply);
    Ok(serde_json::from_str(&cleaned)?)
}

/// Classifies product descriptions by delegating to a [`CompletionProvider`].
#[derive(Clone)]
pub struct ClassificationService {
    provider: Arc<dyn CompletionProvider>,
}

impl ClassificationService {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Classifies a single product description.
    ///
    /// Empty input is rejected without contacting the provider. Each call
    /// makes exactly one upstream request otherwise; nothing is retried or cached.
    pub async fn classify(
        &self,
        product_description: &str,
    ) -> Result<ClassificationResult, AppError> {
        if product_description.trim().is_empty() {
            return Err(AppError::BadRequest(
                "product_description is required".to_string(),
            ));
        }

        let request_id = Uuid::new_v4();
        self.classify_inner(product_description)
            .instrument(tracing::info_span!("classify", %request_id))
            .await
    }

    async fn classify_inner(
        &self,
        product_description: &str,
    ) -> Result<ClassificationResult, AppError> {
        tracing::info!(
            "Classifying product description ({} chars)",
            product_description.chars().count()
        );

        let prompt = build_prompt(product_description);
        let reply = self.provider.complete(&prompt).await?;
        tracing::debug!("Model replied with {} bytes", reply.len());

        let result = parse_classification(&reply)?;
        tracing::info!(
            "Classified as {} ({:?} confidence)",
            result.hs_code,
            result.confidence
        );

        Ok(result)
    }
}
