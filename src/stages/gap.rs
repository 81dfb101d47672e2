//! Gap-analysis stage: what stands between the learner and the topic.

use super::{generate, OFFLINE_NOTE};
use crate::ctx::PlanCtx;
use crate::pipeline::Step;
use crate::prompt::{render, PromptVars};
use crate::types::{GapAssessment, PlanRequest};

const SYSTEM: &str = "You are an expert educational consultant specializing in gap analysis.";

const TEMPLATE: &str = "\
Analyze the learner's current background and the topic they want to learn, \
and identify the knowledge gaps between the two.

Learner:
- Topic to learn: {topic}
- Current background: {background}
- Preferred learning format: {format}

Respond with a JSON object in exactly this shape:
{{
    \"identified_gaps\": [\"gap1\", \"gap2\", \"gap3\"],
    \"current_level\": \"assessment of current knowledge level\",
    \"target_level\": \"what knowledge level they need to reach\",
    \"gap_analysis\": \"why these gaps exist\"
}}

Be specific and actionable. Consider the learning format preference when \
analyzing gaps.";

/// First stage: produces a [`GapAssessment`] from the request alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct GapAnalysis;

impl GapAnalysis {
    pub(crate) fn prompt(request: &PlanRequest) -> String {
        let vars = PromptVars::new()
            .set("topic", &request.topic)
            .set("background", &request.background)
            .set("format", request.preferred_format.to_string());
        render(TEMPLATE, &vars)
    }

    fn fallback(offline: bool) -> GapAssessment {
        let note = if offline { OFFLINE_NOTE } else { "" };
        GapAssessment {
            gaps: vec!["Basic understanding needed".to_string()],
            current_level: "Beginner".to_string(),
            target_level: "Intermediate".to_string(),
            rationale: format!("General knowledge gap identified{note}"),
        }
    }

    /// Run the stage. Never fails: unavailability and call failures both
    /// resolve to the fixed fallback assessment.
    pub async fn run(&self, ctx: &PlanCtx, request: &PlanRequest) -> GapAssessment {
        generate(ctx, SYSTEM, Self::prompt(request))
            .await
            .resolve(ctx, Step::GapAnalysis, Self::fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{FailingGenerator, MockGenerator};
    use crate::types::LearningFormat;
    use std::sync::Arc;

    fn request() -> PlanRequest {
        PlanRequest::new("Python Programming", "complete beginner", LearningFormat::Video)
    }

    #[test]
    fn test_prompt_embeds_request_fields() {
        let prompt = GapAnalysis::prompt(&request());
        assert!(prompt.contains("Python Programming"));
        assert!(prompt.contains("complete beginner"));
        assert!(prompt.contains("video"));
        // JSON shape example survives brace escaping
        assert!(prompt.contains("\"identified_gaps\""));
        assert!(!prompt.contains("{{"));
    }

    #[tokio::test]
    async fn test_unavailable_returns_marked_fallback() {
        let ctx = PlanCtx::offline();
        let gap = GapAnalysis.run(&ctx, &request()).await;
        assert_eq!(gap.gaps, vec!["Basic understanding needed"]);
        assert_eq!(gap.current_level, "Beginner");
        assert_eq!(gap.target_level, "Intermediate");
        assert!(gap.rationale.ends_with("(LLM not available)"));
    }

    #[tokio::test]
    async fn test_failure_returns_unmarked_fallback() {
        let ctx = PlanCtx::builder("http://unused")
            .generator(Arc::new(FailingGenerator::default()))
            .build();
        let gap = GapAnalysis.run(&ctx, &request()).await;
        assert_eq!(gap.current_level, "Beginner");
        assert!(!gap.rationale.contains("LLM not available"));
    }

    #[tokio::test]
    async fn test_valid_response_passes_through() {
        let ctx = PlanCtx::builder("http://unused")
            .generator(Arc::new(MockGenerator::fixed(
                r#"{"identified_gaps": ["syntax", "tooling"],
                    "current_level": "no programming experience",
                    "target_level": "can write small scripts",
                    "gap_analysis": "needs foundations first"}"#,
            )))
            .build();
        let gap = GapAnalysis.run(&ctx, &request()).await;
        assert_eq!(gap.gaps, vec!["syntax", "tooling"]);
        assert_eq!(gap.current_level, "no programming experience");
        assert_eq!(gap.target_level, "can write small scripts");
        assert_eq!(gap.rationale, "needs foundations first");
    }

    #[tokio::test]
    async fn test_malformed_response_falls_back() {
        let ctx = PlanCtx::builder("http://unused")
            .generator(Arc::new(MockGenerator::fixed("I refuse to emit JSON")))
            .build();
        let gap = GapAnalysis.run(&ctx, &request()).await;
        assert_eq!(gap.gaps, vec!["Basic understanding needed"]);
    }
}
