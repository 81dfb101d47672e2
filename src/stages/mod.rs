//! The four pipeline stages.
//!
//! Each stage renders a prompt from the artifacts it consumes, asks the
//! generator for a JSON response, and parses it into its typed artifact.
//! The outcome of that call is an explicit [`Generation`] value rather
//! than an exception path: `Unavailable` (no generator configured, no
//! call attempted) and `Failed` (call errored or response unparseable)
//! both resolve to the stage's documented fallback, so a stage never
//! returns an error and a single bad call never aborts the run.

pub mod compose;
pub mod detail;
pub mod gap;
pub mod outline;

pub use compose::PlanCombination;
pub use detail::TopicDetailing;
pub use gap::GapAnalysis;
pub use outline::TopicPlanning;

use crate::ctx::PlanCtx;
use crate::events::{emit, Event, FallbackCause};
use crate::generator::GenRequest;
use crate::parsing;
use crate::pipeline::Step;
use serde::de::DeserializeOwned;

/// Marker appended to one text field of each fallback artifact when no
/// generator was configured, so offline plans are recognizable as such.
pub(crate) const OFFLINE_NOTE: &str = " (LLM not available)";

/// Outcome of one structured-generation call.
#[derive(Debug, Clone, PartialEq)]
pub enum Generation<T> {
    /// The generator returned a response that parsed into the artifact.
    Generated(T),
    /// No generator is configured; no call was attempted.
    Unavailable,
    /// The call errored, or its response did not parse into the artifact.
    Failed(String),
}

impl<T> Generation<T> {
    /// Resolve to the artifact, substituting `fallback` on `Unavailable`
    /// or `Failed` and emitting a [`Event::Fallback`] naming the cause.
    ///
    /// The closure receives `true` when the generator was unavailable,
    /// which is when fallback text carries [`OFFLINE_NOTE`].
    pub(crate) fn resolve(
        self,
        ctx: &PlanCtx,
        step: Step,
        fallback: impl FnOnce(bool) -> T,
    ) -> T {
        match self {
            Generation::Generated(artifact) => artifact,
            Generation::Unavailable => {
                emit(
                    &ctx.event_handler,
                    Event::Fallback {
                        step,
                        cause: FallbackCause::Unavailable,
                    },
                );
                fallback(true)
            }
            Generation::Failed(reason) => {
                emit(
                    &ctx.event_handler,
                    Event::Fallback {
                        step,
                        cause: FallbackCause::Failed(reason),
                    },
                );
                fallback(false)
            }
        }
    }
}

/// Execute one structured-generation call: prompt in, typed artifact out.
///
/// Requests JSON mode regardless of the context's default, since every
/// stage expects a structured response.
pub(crate) async fn generate<T: DeserializeOwned>(
    ctx: &PlanCtx,
    system_prompt: &str,
    prompt: String,
) -> Generation<T> {
    let Some(generator) = ctx.generator.as_ref() else {
        return Generation::Unavailable;
    };

    let request = GenRequest {
        model: ctx.model.clone(),
        system_prompt: Some(system_prompt.to_string()),
        prompt,
        config: ctx.config.clone().with_json_mode(true),
    };

    match generator.generate(&ctx.client, &ctx.base_url, &request).await {
        Ok(response) => match parsing::parse_as::<T>(&response.text) {
            Ok(artifact) => Generation::Generated(artifact),
            Err(e) => Generation::Failed(e.to_string()),
        },
        Err(e) => Generation::Failed(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{FailingGenerator, MockGenerator};
    use crate::types::GapAssessment;
    use std::sync::Arc;

    fn mock_ctx(responses: Vec<&str>) -> PlanCtx {
        PlanCtx::builder("http://unused")
            .generator(Arc::new(MockGenerator::new(
                responses.into_iter().map(String::from).collect(),
            )))
            .build()
    }

    #[tokio::test]
    async fn test_generate_unavailable_without_generator() {
        let ctx = PlanCtx::offline();
        let outcome: Generation<GapAssessment> = generate(&ctx, "system", "prompt".into()).await;
        assert_eq!(outcome, Generation::Unavailable);
    }

    #[tokio::test]
    async fn test_generate_parses_valid_response() {
        let ctx = mock_ctx(vec![
            r#"{"identified_gaps": ["g"], "current_level": "a", "target_level": "b", "gap_analysis": "c"}"#,
        ]);
        let outcome: Generation<GapAssessment> = generate(&ctx, "system", "prompt".into()).await;
        match outcome {
            Generation::Generated(gap) => assert_eq!(gap.gaps, vec!["g"]),
            other => panic!("expected Generated, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_failed_on_garbage() {
        let ctx = mock_ctx(vec!["not json at all"]);
        let outcome: Generation<GapAssessment> = generate(&ctx, "system", "prompt".into()).await;
        assert!(matches!(outcome, Generation::Failed(_)));
    }

    #[tokio::test]
    async fn test_generate_failed_on_call_error() {
        let ctx = PlanCtx::builder("http://unused")
            .generator(Arc::new(FailingGenerator::new(500)))
            .build();
        let outcome: Generation<GapAssessment> = generate(&ctx, "system", "prompt".into()).await;
        match outcome {
            Generation::Failed(reason) => assert!(reason.contains("500")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_distinguishes_unavailable_from_failed() {
        let ctx = PlanCtx::offline();
        let unavailable: Generation<String> = Generation::Unavailable;
        let failed: Generation<String> = Generation::Failed("boom".into());

        let a = unavailable.resolve(&ctx, Step::GapAnalysis, |offline| {
            format!("fallback offline={offline}")
        });
        let b = failed.resolve(&ctx, Step::GapAnalysis, |offline| {
            format!("fallback offline={offline}")
        });
        assert_eq!(a, "fallback offline=true");
        assert_eq!(b, "fallback offline=false");
    }
}
