//! Topic-planning stage: the curriculum skeleton.

use super::{generate, OFFLINE_NOTE};
use crate::ctx::PlanCtx;
use crate::pipeline::Step;
use crate::prompt::{numbered_list, render, PromptVars};
use crate::types::{CurriculumOutline, GapAssessment, PlanRequest};

const SYSTEM: &str = "You are an expert curriculum designer specializing in creating learning plans.";

const TEMPLATE: &str = "\
Based on the identified knowledge gaps, create a structured curriculum outline.

Context:
- Topic: {topic}
- Knowledge gaps:
{gaps}
- Current level: {current_level}
- Target level: {target_level}
- Preferred format: {format}

Respond with a JSON object in exactly this shape:
{{
    \"main_topics\": [\"topic1\", \"topic2\", \"topic3\"],
    \"subtopics\": [\"subtopic1\", \"subtopic2\", \"subtopic3\"],
    \"learning_objectives\": [\"objective1\", \"objective2\", \"objective3\"],
    \"estimated_duration\": \"estimated time to complete\"
}}

Give each main topic a matching learning objective at the same position. \
Ensure the outline addresses every identified gap and suits the learner's \
level and preferred format.";

/// Second stage: produces a [`CurriculumOutline`] from the request and
/// the gap assessment.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopicPlanning;

impl TopicPlanning {
    pub(crate) fn prompt(request: &PlanRequest, gap: &GapAssessment) -> String {
        let vars = PromptVars::new()
            .set("topic", &request.topic)
            .set("gaps", numbered_list(&gap.gaps))
            .set("current_level", &gap.current_level)
            .set("target_level", &gap.target_level)
            .set("format", request.preferred_format.to_string());
        render(TEMPLATE, &vars)
    }

    fn fallback(offline: bool) -> CurriculumOutline {
        let note = if offline { OFFLINE_NOTE } else { "" };
        CurriculumOutline {
            main_topics: vec![
                "Introduction".to_string(),
                "Core Concepts".to_string(),
                "Advanced Topics".to_string(),
            ],
            subtopics: vec![
                "Basics".to_string(),
                "Fundamentals".to_string(),
                "Applications".to_string(),
            ],
            objectives: vec![
                "Understand basics".to_string(),
                "Master fundamentals".to_string(),
                "Apply knowledge".to_string(),
            ],
            duration_estimate: format!("4-6 weeks{note}"),
        }
    }

    /// Run the stage. Never fails; the outline is not cross-validated
    /// against the gap list — that judgment stays with the generator.
    pub async fn run(
        &self,
        ctx: &PlanCtx,
        request: &PlanRequest,
        gap: &GapAssessment,
    ) -> CurriculumOutline {
        generate(ctx, SYSTEM, Self::prompt(request, gap))
            .await
            .resolve(ctx, Step::TopicPlanning, Self::fallback)
    }
}
