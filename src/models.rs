use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============ Request Models ============

/// Body of `POST /api/classify`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ClassificationRequest {
    /// Free-text description of the product to classify.
    ///
    /// A missing field is treated the same as an empty one.
    #[serde(default)]
    #[schema(example = "wireless bluetooth headphones")]
    pub product_description: String,
}

// ============ Response Models ============

/// How sure the model is about the proposed HS code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Structured HS classification returned by the model.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct ClassificationResult {
    /// Dotted HS code, e.g. "8518.30.20".
    #[schema(example = "8518.30.20")]
    pub hs_code: String,
    /// What goods the HS code covers.
    pub description: String,
    pub confidence: Confidence,
    /// Why this classification applies.
    pub reasoning: String,
    /// Chapter number and name, e.g. "85 - Electrical machinery".
    pub chapter: String,
    /// Key factors that influenced the classification, in the order given.
    pub considerations: Vec<String>,
}

/// Uniform error body for every failure path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_description_defaults_to_empty() {
        let req: ClassificationRequest = serde_json::from_str("{}").unwrap();
        assert!(req.product_description.is_empty());
    }

    #[test]
    fn test_confidence_is_kept_as_written() {
        let c: Confidence = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(c, Confidence::Medium);
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"medium\"");
        assert!(serde_json::from_str::<Confidence>("\"High\"").is_err());
    }

    #[test]
    fn test_missing_considerations_is_rejected() {
        let reply = r#"{"hs_code":"8518.30.20","description":"Headphones","confidence":"high","reasoning":"...","chapter":"85"}"#;
        assert!(serde_json::from_str::<ClassificationResult>(reply).is_err());
    }

    #[test]
    fn test_schema_fields_round_trip_unchanged() {
        let reply = serde_json::json!({
            "hs_code": "8518.30.20",
            "description": "Headphones and earphones",
            "confidence": "low",
            "reasoning": "...",
            "chapter": "85 - Electrical machinery",
            "considerations": ["Wireless connectivity"]
        });
        let parsed: ClassificationResult = serde_json::from_value(reply.clone()).unwrap();
        assert_eq!(serde_json::to_value(&parsed).unwrap(), reply);
    }

    #[test]
    fn test_unknown_confidence_is_rejected() {
        assert!(serde_json::from_str::<Confidence>("\"certain\"").is_err());
    }
}
