//! # learnpath
//!
//! A four-stage LLM pipeline that turns a topic, background, and format
//! preference into a structured, personalized learning plan.
//!
//! The pipeline is strictly linear: **gap analysis** → **topic planning**
//! → **per-topic detailing** → **plan combination**. Each stage renders a
//! prompt, asks the generation backend for a JSON response, and parses it
//! into a typed artifact. When the backend is unavailable or a call
//! fails, the stage substitutes a documented fallback value instead of
//! failing — the caller always receives a complete plan or one fatal
//! error, never a partial result.
//!
//! ## Core Concepts
//!
//! - **[`PlanRequest`]** — what the learner asked for: topic, background,
//!   preferred format.
//! - **[`PlanCtx`]** — injected execution context: HTTP client, optional
//!   [`Generator`](generator::Generator) handle, model, config, events.
//!   A context without a generator is *offline* and produces an
//!   all-fallback plan.
//! - **[`LearningPlanner`]** — the driver: runs the four stages in order
//!   and assembles the final [`LearningPlan`].
//! - **[`events::EventHandler`]** — optional hook for stage lifecycle,
//!   per-topic progress, and fallback announcements.
//!
//! ## Quick Start
//!
//! ```no_run
//! use learnpath::{LearningFormat, LearningPlanner, PlanCtx, PlanRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = PlanCtx::builder("http://localhost:11434")
//!         .model("llama3.2:3b")
//!         .build();
//!
//!     let request = PlanRequest::new(
//!         "Rust",
//!         "two years of Python, no systems languages",
//!         LearningFormat::Text,
//!     );
//!
//!     let plan = LearningPlanner::new().run(&ctx, request).await?;
//!     println!("{}", serde_json::to_string_pretty(&plan)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Testing without a backend
//!
//! [`generator::MockGenerator`] returns canned responses in order, and
//! [`PlanCtx::offline`] exercises the fallback paths — both make runs
//! fully deterministic.

pub mod ctx;
pub mod error;
pub mod events;
pub mod generator;
pub mod parsing;
pub mod pipeline;
pub mod prompt;
pub mod stages;
pub mod types;

pub use ctx::{PlanCtx, PlanCtxBuilder};
pub use error::{PlanError, Result};
pub use generator::{FailingGenerator, GenConfig, MockGenerator, OllamaGenerator};
pub use pipeline::{LearningPlanner, PipelineState, Step};
pub use stages::{GapAnalysis, PlanCombination, TopicDetailing, TopicPlanning};
pub use types::{
    ComposedPlan, CurriculumOutline, GapAssessment, LearningFormat, LearningPlan, PlanRequest,
    TopicDetail,
};
