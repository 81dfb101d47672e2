//! Data model for learning-plan generation.
//!
//! A [`PlanRequest`] flows through four stages, each producing one artifact
//! ([`GapAssessment`], [`CurriculumOutline`], [`TopicDetail`] per topic,
//! [`ComposedPlan`]); the driver assembles them into a [`LearningPlan`].
//! Field renames preserve the JSON keys the stage prompts instruct the
//! model to emit, so valid responses deserialize without any field loss.

use crate::error::PlanError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The content format the learner prefers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningFormat {
    Video,
    Text,
    Audio,
}

impl fmt::Display for LearningFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LearningFormat::Video => "video",
            LearningFormat::Text => "text",
            LearningFormat::Audio => "audio",
        };
        f.write_str(s)
    }
}

impl FromStr for LearningFormat {
    type Err = PlanError;

    /// Parse a format string. Callers in front of the pipeline use this to
    /// reject invalid formats before a request is ever constructed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video" => Ok(LearningFormat::Video),
            "text" => Ok(LearningFormat::Text),
            "audio" => Ok(LearningFormat::Audio),
            other => Err(PlanError::UnknownFormat(other.to_string())),
        }
    }
}

/// What the learner asked for. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// The topic the learner wants to study.
    pub topic: String,

    /// Free-text description of their current background and knowledge.
    pub background: String,

    /// Preferred content format.
    pub preferred_format: LearningFormat,

    /// Accepted for interface compatibility; the pipeline always makes
    /// exactly one pass, so values above 1 have no effect.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_max_attempts() -> u32 {
    1
}

impl PlanRequest {
    pub fn new(
        topic: impl Into<String>,
        background: impl Into<String>,
        preferred_format: LearningFormat,
    ) -> Self {
        Self {
            topic: topic.into(),
            background: background.into(),
            preferred_format,
            max_attempts: 1,
        }
    }

    /// Set the attempt budget (kept as a documented no-op, see `max_attempts`).
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }
}

/// Output of the gap-analysis stage: what stands between the learner's
/// background and the target topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapAssessment {
    /// Knowledge gaps, most fundamental first.
    #[serde(rename = "identified_gaps")]
    pub gaps: Vec<String>,

    /// Assessment of where the learner is now.
    pub current_level: String,

    /// Where they need to get to.
    pub target_level: String,

    /// Why these gaps exist.
    #[serde(rename = "gap_analysis")]
    pub rationale: String,
}

/// Output of the topic-planning stage: the curriculum skeleton.
///
/// `objectives[i]` pairs with `main_topics[i]` when both exist; the
/// detailing stage substitutes a generic objective when the lists are
/// uneven. `subtopics` is a flat list with no positional relationship
/// to `main_topics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurriculumOutline {
    pub main_topics: Vec<String>,

    pub subtopics: Vec<String>,

    #[serde(rename = "learning_objectives")]
    pub objectives: Vec<String>,

    #[serde(rename = "estimated_duration")]
    pub duration_estimate: String,
}

/// Output of the detailing stage for one main topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicDetail {
    #[serde(rename = "topic_name")]
    pub name: String,

    pub description: String,

    /// Recommended resources, matched to the preferred format.
    pub resources: Vec<String>,

    /// Practice exercises appropriate to the learner's background.
    pub exercises: Vec<String>,

    /// How to tell the topic has been understood.
    pub assessment_criteria: String,
}

/// Output of the combination stage: the narrative layer over the
/// structured artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedPlan {
    /// Step-by-step learning path with clear progression.
    pub learning_path: String,

    /// Overall recommended resources.
    pub recommended_resources: Vec<String>,

    /// Suggested timeline for completion.
    pub timeline: String,

    /// Metrics to measure progress against.
    pub success_metrics: Vec<String>,
}

/// The complete learning plan returned to the caller. Immutable once built;
/// serializes as one flat document with no cyclic references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPlan {
    pub request: PlanRequest,

    pub gap: GapAssessment,

    pub outline: CurriculumOutline,

    /// One detail per `outline.main_topics` entry, same order.
    pub topic_details: Vec<TopicDetail>,

    #[serde(flatten)]
    pub composed: ComposedPlan,
}
