//! Plan-combination stage: merges every prior artifact into the final
//! narrative layer.

use super::{generate, OFFLINE_NOTE};
use crate::ctx::PlanCtx;
use crate::pipeline::Step;
use crate::prompt::{numbered_list, render, section, PromptVars};
use crate::types::{ComposedPlan, CurriculumOutline, GapAssessment, PlanRequest, TopicDetail};

const SYSTEM: &str =
    "You are an expert learning coordinator who combines learning components into a cohesive plan.";

const TEMPLATE: &str = "\
Combine the gap analysis, curriculum outline, and topic details below into \
one cohesive learning plan.

{context}

Respond with a JSON object in exactly this shape:
{{
    \"learning_path\": \"step-by-step learning path with clear progression\",
    \"recommended_resources\": [\"overall resource1\", \"overall resource2\"],
    \"timeline\": \"suggested timeline for completion\",
    \"success_metrics\": [\"metric1\", \"metric2\", \"metric3\"]
}}

Ensure the plan flows logically, addresses every identified gap, and is \
actionable and measurable for the learner.";

/// Fourth stage: produces the [`ComposedPlan`]. The only stage that sees
/// every prior artifact.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanCombination;

impl PlanCombination {
    /// Summarize all prior artifacts into labeled prompt sections.
    pub(crate) fn context_block(
        request: &PlanRequest,
        gap: &GapAssessment,
        outline: &CurriculumOutline,
        details: &[TopicDetail],
    ) -> String {
        let learner = format!(
            "Topic: {}\nBackground: {}\nPreferred format: {}",
            request.topic, request.background, request.preferred_format
        );

        let gaps = format!(
            "{}\nCurrent level: {}\nTarget level: {}\nRationale: {}",
            numbered_list(&gap.gaps),
            gap.current_level,
            gap.target_level,
            gap.rationale
        );

        let curriculum = format!(
            "Main topics:\n{}\nObjectives:\n{}\nEstimated duration: {}",
            numbered_list(&outline.main_topics),
            numbered_list(&outline.objectives),
            outline.duration_estimate
        );

        let detail_blocks = details
            .iter()
            .map(|d| {
                format!(
                    "### {}\n{}\nResources:\n{}\nExercises:\n{}\nAssessment: {}",
                    d.name,
                    d.description,
                    numbered_list(&d.resources),
                    numbered_list(&d.exercises),
                    d.assessment_criteria
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        [
            section("Learner", &learner),
            section("Gap analysis", &gaps),
            section("Curriculum outline", &curriculum),
            section("Topic details", &detail_blocks),
        ]
        .join("\n\n")
    }

    pub(crate) fn prompt(
        request: &PlanRequest,
        gap: &GapAssessment,
        outline: &CurriculumOutline,
        details: &[TopicDetail],
    ) -> String {
        let vars = PromptVars::new().set(
            "context",
            Self::context_block(request, gap, outline, details),
        );
        render(TEMPLATE, &vars)
    }

    fn fallback(offline: bool) -> ComposedPlan {
        let note = if offline { OFFLINE_NOTE } else { "" };
        ComposedPlan {
            learning_path: format!(
                "Follow the structured topics in order, practice regularly, and assess progress{note}"
            ),
            recommended_resources: vec![
                "Online courses".to_string(),
                "Practice platforms".to_string(),
                "Community forums".to_string(),
            ],
            timeline: "4-6 weeks with 2-3 hours per week".to_string(),
            success_metrics: vec![
                "Complete all exercises".to_string(),
                "Pass assessments".to_string(),
                "Apply knowledge practically".to_string(),
            ],
        }
    }

    /// Run the stage. Never fails.
    pub async fn run(
        &self,
        ctx: &PlanCtx,
        request: &PlanRequest,
        gap: &GapAssessment,
        outline: &CurriculumOutline,
        details: &[TopicDetail],
    ) -> ComposedPlan {
        generate(ctx, SYSTEM, Self::prompt(request, gap, outline, details))
            .await
            .resolve(ctx, Step::PlanCombination, Self::fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::MockGenerator;
    use crate::types::LearningFormat;
    use std::sync::Arc;

    fn artifacts() -> (PlanRequest, GapAssessment, CurriculumOutline, Vec<TopicDetail>) {
        let request = PlanRequest::new("Rust", "knows Python", LearningFormat::Text);
        let gap = GapAssessment {
            gaps: vec!["ownership".into()],
            current_level: "scripting".into(),
            target_level: "systems".into(),
            rationale: "new paradigm".into(),
        };
        let outline = CurriculumOutline {
            main_topics: vec!["Ownership".into()],
            subtopics: vec!["moves".into()],
            objectives: vec!["Explain moves".into()],
            duration_estimate: "3 weeks".into(),
        };
        let details = vec![TopicDetail {
            name: "Ownership".into(),
            description: "Move semantics".into(),
            resources: vec!["The Book ch. 4".into()],
            exercises: vec!["rustlings".into()],
            assessment_criteria: "predict borrow errors".into(),
        }];
        (request, gap, outline, details)
    }

    #[test]
    fn test_context_block_carries_all_artifacts() {
        let (request, gap, outline, details) = artifacts();
        let block = PlanCombination::context_block(&request, &gap, &outline, &details);
        assert!(block.contains("## Learner"));
        assert!(block.contains("## Gap analysis"));
        assert!(block.contains("## Curriculum outline"));
        assert!(block.contains("## Topic details"));
        assert!(block.contains("1. ownership"));
        assert!(block.contains("### Ownership"));
        assert!(block.contains("The Book ch. 4"));
    }

    #[test]
    fn test_prompt_keeps_json_shape_literal() {
        let (request, gap, outline, details) = artifacts();
        let prompt = PlanCombination::prompt(&request, &gap, &outline, &details);
        assert!(prompt.contains("\"learning_path\""));
        assert!(!prompt.contains("{{"));
        assert!(prompt.contains("## Learner"));
    }

    #[tokio::test]
    async fn test_unavailable_fallback_marks_path() {
        let (request, gap, outline, details) = artifacts();
        let ctx = PlanCtx::offline();
        let composed = PlanCombination.run(&ctx, &request, &gap, &outline, &details).await;
        assert!(composed.learning_path.ends_with("(LLM not available)"));
        assert_eq!(composed.timeline, "4-6 weeks with 2-3 hours per week");
        assert_eq!(composed.success_metrics.len(), 3);
    }

    #[tokio::test]
    async fn test_valid_response_passes_through() {
        let (request, gap, outline, details) = artifacts();
        let ctx = PlanCtx::builder("http://unused")
            .generator(Arc::new(MockGenerator::fixed(
                r#"{"learning_path": "start with ownership",
                    "recommended_resources": ["The Book"],
                    "timeline": "3 weeks",
                    "success_metrics": ["ship a CLI"]}"#,
            )))
            .build();
        let composed = PlanCombination.run(&ctx, &request, &gap, &outline, &details).await;
        assert_eq!(composed.learning_path, "start with ownership");
        assert_eq!(composed.recommended_resources, vec!["The Book"]);
        assert_eq!(composed.timeline, "3 weeks");
    }
}
