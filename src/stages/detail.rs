//! Topic-detailing stage: resources, exercises, and assessment criteria
//! for each main topic.

use super::{generate, OFFLINE_NOTE};
use crate::ctx::PlanCtx;
use crate::events::{emit, Event};
use crate::pipeline::Step;
use crate::prompt::{render, PromptVars};
use crate::types::{CurriculumOutline, PlanRequest, TopicDetail};

const SYSTEM: &str = "You are an expert learning content specialist who creates detailed topic breakdowns.";

/// Objective used when `objectives` is shorter than `main_topics`.
const GENERIC_OBJECTIVE: &str = "Learn the topic";

const TEMPLATE: &str = "\
Create a detailed breakdown for one topic of the learning plan.

Context:
- Topic name: {topic_name}
- Learning objective: {objective}
- Preferred format: {format}
- Learner background: {background}

Respond with a JSON object in exactly this shape:
{{
    \"topic_name\": \"exact topic name\",
    \"description\": \"what this topic covers\",
    \"resources\": [\"resource1\", \"resource2\", \"resource3\"],
    \"exercises\": [\"exercise1\", \"exercise2\", \"exercise3\"],
    \"assessment_criteria\": \"how to assess understanding of this topic\"
}}

Make resources and exercises specific to the preferred learning format, \
and keep exercises appropriate for the learner's background.";

/// Third stage: produces one [`TopicDetail`] per `main_topics` entry,
/// in order. Calls are sequential and isolated — a failure in one
/// topic's call falls back for that topic only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopicDetailing;

impl TopicDetailing {
    /// The objective paired with `main_topics[index]`, or the generic
    /// placeholder when the objective list is shorter.
    pub(crate) fn objective_for(outline: &CurriculumOutline, index: usize) -> &str {
        outline
            .objectives
            .get(index)
            .map(|s| s.as_str())
            .unwrap_or(GENERIC_OBJECTIVE)
    }

    pub(crate) fn prompt(request: &PlanRequest, topic: &str, objective: &str) -> String {
        let vars = PromptVars::new()
            .set("topic_name", topic)
            .set("objective", objective)
            .set("format", request.preferred_format.to_string())
            .set("background", &request.background);
        render(TEMPLATE, &vars)
    }

    fn fallback(topic: &str, offline: bool) -> TopicDetail {
        let note = if offline { OFFLINE_NOTE } else { "" };
        TopicDetail {
            name: topic.to_string(),
            description: format!("Comprehensive coverage of {topic}{note}"),
            resources: vec![
                "Online course".to_string(),
                "Practice exercises".to_string(),
                "Reference materials".to_string(),
            ],
            exercises: vec![
                "Multiple choice questions".to_string(),
                "Practical projects".to_string(),
                "Self-assessment".to_string(),
            ],
            assessment_criteria: "Demonstrate understanding through practical application"
                .to_string(),
        }
    }

    /// Detail a single topic.
    async fn detail_topic(
        &self,
        ctx: &PlanCtx,
        request: &PlanRequest,
        topic: &str,
        objective: &str,
    ) -> TopicDetail {
        generate(ctx, SYSTEM, Self::prompt(request, topic, objective))
            .await
            .resolve(ctx, Step::TopicDetailing, |offline| {
                Self::fallback(topic, offline)
            })
    }

    /// Run the stage: exactly one detail per main topic, same order.
    pub async fn run(
        &self,
        ctx: &PlanCtx,
        request: &PlanRequest,
        outline: &CurriculumOutline,
    ) -> Vec<TopicDetail> {
        let mut details = Vec::with_capacity(outline.main_topics.len());

        for (index, topic) in outline.main_topics.iter().enumerate() {
            let objective = Self::objective_for(outline, index);
            let detail = self.detail_topic(ctx, request, topic, objective).await;
            emit(
                &ctx.event_handler,
                Event::TopicDetailed {
                    index,
                    name: topic.clone(),
                },
            );
            details.push(detail);
        }

        details
    }
}
