//! Pipeline driver: runs the four stages in fixed order.
//!
//! Orchestration is a plain ordered call sequence — the workflow never
//! branches or cycles, so there is no graph executor. Artifacts are
//! threaded directly from stage to stage and mirrored into a
//! [`PipelineState`] accumulator whose `current_step` marker exists for
//! diagnostics only.
//!
//! Stages absorb their own failures into documented fallback values; the
//! driver propagates exactly one error class: reaching the terminal step
//! without an assembled plan.

use crate::ctx::PlanCtx;
use crate::error::{PlanError, Result};
use crate::events::{emit, Event};
use crate::stages::{GapAnalysis, PlanCombination, TopicDetailing, TopicPlanning};
use crate::types::{
    CurriculumOutline, GapAssessment, LearningPlan, PlanRequest, TopicDetail,
};
use std::fmt;

/// The pipeline's step marker. Strictly linear:
/// `GapAnalysis → TopicPlanning → TopicDetailing → PlanCombination → Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    GapAnalysis,
    TopicPlanning,
    TopicDetailing,
    PlanCombination,
    Done,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Step::GapAnalysis => "gap_analysis",
            Step::TopicPlanning => "topic_planning",
            Step::TopicDetailing => "topic_detailing",
            Step::PlanCombination => "plan_combination",
            Step::Done => "done",
        };
        f.write_str(s)
    }
}

/// Mutable accumulator for one pipeline run.
///
/// Created at call time, populated field by field as stages complete,
/// converted into the final [`LearningPlan`] at the end, then dropped.
/// Owned exclusively by the driver; never shared across runs.
#[derive(Debug, Clone)]
pub struct PipelineState {
    pub request: PlanRequest,
    pub gap: Option<GapAssessment>,
    pub outline: Option<CurriculumOutline>,
    pub topic_details: Option<Vec<TopicDetail>>,
    pub plan: Option<LearningPlan>,
    /// Last transition taken. Diagnostic only — never drives control flow.
    pub current_step: Step,
}

impl PipelineState {
    fn new(request: PlanRequest) -> Self {
        Self {
            request,
            gap: None,
            outline: None,
            topic_details: None,
            plan: None,
            current_step: Step::GapAnalysis,
        }
    }

    /// Yield the assembled plan, or the integrity error if the terminal
    /// step was reached without one.
    fn into_plan(self) -> Result<LearningPlan> {
        self.plan.ok_or_else(|| {
            PlanError::Incomplete(format!(
                "terminal step reached at '{}' with no assembled plan",
                self.current_step
            ))
        })
    }
}

/// Runs the four stages in order and assembles the final plan.
///
/// # Example
///
/// ```no_run
/// use learnpath::{LearningFormat, LearningPlanner, PlanCtx, PlanRequest};
///
/// # async fn demo() -> learnpath::Result<()> {
/// let ctx = PlanCtx::builder("http://localhost:11434").build();
/// let request = PlanRequest::new(
///     "Rust",
///     "two years of Python, no systems languages",
///     LearningFormat::Text,
/// );
/// let plan = LearningPlanner::new().run(&ctx, request).await?;
/// println!("{}", plan.composed.learning_path);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LearningPlanner {
    gap: GapAnalysis,
    planning: TopicPlanning,
    detailing: TopicDetailing,
    combination: PlanCombination,
}

impl LearningPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute one full pass over the pipeline.
    ///
    /// Always terminates in four transitions. Returns a fully populated
    /// plan — possibly built from fallback content — or the single fatal
    /// integrity error; never a partial plan.
    ///
    /// `request.max_attempts` is accepted but has no effect: the pipeline
    /// makes exactly one pass.
    pub async fn run(&self, ctx: &PlanCtx, request: PlanRequest) -> Result<LearningPlan> {
        let mut state = PipelineState::new(request);

        emit(&ctx.event_handler, Event::StageStart { step: Step::GapAnalysis });
        let gap = self.gap.run(ctx, &state.request).await;
        state.gap = Some(gap.clone());
        state.current_step = Step::TopicPlanning;
        emit(&ctx.event_handler, Event::StageEnd { step: Step::GapAnalysis });

        emit(&ctx.event_handler, Event::StageStart { step: Step::TopicPlanning });
        let outline = self.planning.run(ctx, &state.request, &gap).await;
        state.outline = Some(outline.clone());
        state.current_step = Step::TopicDetailing;
        emit(&ctx.event_handler, Event::StageEnd { step: Step::TopicPlanning });

        emit(&ctx.event_handler, Event::StageStart { step: Step::TopicDetailing });
        let details = self.detailing.run(ctx, &state.request, &outline).await;
        state.topic_details = Some(details.clone());
        state.current_step = Step::PlanCombination;
        emit(&ctx.event_handler, Event::StageEnd { step: Step::TopicDetailing });

        emit(&ctx.event_handler, Event::StageStart { step: Step::PlanCombination });
        let composed = self
            .combination
            .run(ctx, &state.request, &gap, &outline, &details)
            .await;
        state.plan = Some(LearningPlan {
            request: state.request.clone(),
            gap,
            outline,
            topic_details: details,
            composed,
        });
        state.current_step = Step::Done;
        emit(&ctx.event_handler, Event::StageEnd { step: Step::PlanCombination });

        state.into_plan()
    }
}
