//! Reviewer recommendation — suggests three complementary reviewer roles for
//! scoring a piece of text against some criteria.

use genie_core::{FunctionSchema, Message, RequestOptions};
use genie_providers::error::Result;
use genie_providers::Requester;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

const PROMPT: &str = "\
Identify the top 3 suitable reviewer titles or roles based on the provided text and criteria. \
Selected reviewers must possess subject matter expertise, offer valuable insights, and ensure \
diverse yet aligned perspectives on the content.

# Instructions
1. **Analyze the Text and Criteria**: Examine the content and criteria to identify relevant reviewer titles or roles.
2. **Determine Subject Matter Expertise**: Select reviewers with substantial knowledge or experience in the subject area.
3. **Evaluate Insight Contribution**: Prioritize titles or roles capable of providing meaningful and actionable feedback on the content.
4. **Incorporate Perspective Diversity**: Ensure the selection includes reviewers with varied but complementary viewpoints while maintaining alignment with the criteria.

# Constraints
- Selected reviewers must align with the content's subject matter and criteria.
- Include reasoning for how each choice supports a thorough and insightful review.
- Avoid redundant or overly similar titles/roles to maintain diversity.
";

/// Reviewer roles suggested by the model. A field the model could not fill
/// is `None`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewerRecommendation {
    pub reasoning: Option<String>,
    pub reviewer1: Option<String>,
    pub reviewer2: Option<String>,
    pub reviewer3: Option<String>,
}

impl ReviewerRecommendation {
    /// The reviewers that were filled in, in order.
    pub fn reviewers(&self) -> Vec<&str> {
        [&self.reviewer1, &self.reviewer2, &self.reviewer3]
            .into_iter()
            .filter_map(|r| r.as_deref())
            .collect()
    }
}

/// Builds the reviewer-recommendation request for one text.
#[derive(Clone, Debug)]
pub struct RecommendedReviews {
    text: String,
    criteria: String,
    options: RequestOptions,
}

impl RecommendedReviews {
    pub fn new(text: impl Into<String>, criteria: impl Into<String>, options: RequestOptions) -> Self {
        RecommendedReviews {
            text: text.into(),
            criteria: criteria.into(),
            options,
        }
    }

    /// Shorthand for `RecommendedReviews::new(..).run(requester)`.
    pub async fn call(
        requester: &Requester,
        text: impl Into<String>,
        criteria: impl Into<String>,
        options: RequestOptions,
    ) -> Result<Option<ReviewerRecommendation>> {
        Self::new(text, criteria, options).run(requester).await
    }

    pub fn messages(&self) -> Vec<Message> {
        vec![
            Message::system(PROMPT),
            Message::user(format!("Scoring criteria: {}", self.criteria)),
            Message::user(format!("Text to score: {}", self.text)),
        ]
    }

    pub fn function() -> FunctionSchema {
        FunctionSchema::new(
            "identify_reviewers",
            "Discover reviewers based on the text and given criteria.",
            json!({
                "type": "object",
                "properties": {
                    "reasoning": { "type": "string" },
                    "reviewer1": { "type": "string" },
                    "reviewer2": { "type": "string" },
                    "reviewer3": { "type": "string" }
                }
            }),
        )
    }

    /// Send the request. `Ok(None)` means the model gave no structured answer.
    pub async fn run(&self, requester: &Requester) -> Result<Option<ReviewerRecommendation>> {
        let mut options = self.options.clone();
        if !options.log.contains_key("trace") {
            options = options.with_log("trace", "RecommendedReviews");
        }

        let answer = requester
            .function_calling(&self.messages(), &Self::function(), &options)
            .await?;

        let Some(fields) = answer.into_fields() else {
            return Ok(None);
        };

        // Fields are schema-typed strings; anything else is treated as unanswered.
        let text_field = |name: &str| {
            fields
                .get(name)
                .and_then(|v| v.as_str())
                .map(String::from)
        };
        let recommendation = ReviewerRecommendation {
            reasoning: text_field("reasoning"),
            reviewer1: text_field("reviewer1"),
            reviewer2: text_field("reviewer2"),
            reviewer3: text_field("reviewer3"),
        };
        debug!(reviewers = ?recommendation.reviewers(), "Recommended reviewers");

        Ok(Some(recommendation))
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
