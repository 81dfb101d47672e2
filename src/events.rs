//! Event hooks for pipeline observability.
//!
//! An optional, non-intrusive way to watch a run: the driver emits an
//! event as each stage starts and ends, the detailing stage reports
//! per-topic progress, and every fallback substitution is announced with
//! its cause. Implement [`EventHandler`] (or use [`FnEventHandler`]) to
//! receive them for logging or progress UIs.

use crate::pipeline::Step;
use std::sync::Arc;

/// Why a stage substituted its fallback value.
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackCause {
    /// No generator is configured; no call was attempted.
    Unavailable,
    /// A call was attempted and failed, or its response did not parse.
    Failed(String),
}

/// Events emitted during a pipeline run.
#[derive(Debug, Clone)]
pub enum Event {
    /// A stage is about to run.
    StageStart {
        /// Which pipeline step is starting.
        step: Step,
    },
    /// A stage finished (its artifact is now in the state record).
    StageEnd {
        /// Which pipeline step finished.
        step: Step,
    },
    /// The detailing stage produced the detail for one main topic.
    TopicDetailed {
        /// Zero-based position in `main_topics`.
        index: usize,
        /// The topic's name.
        name: String,
    },
    /// A stage (or one detailing call) substituted its fallback value.
    Fallback {
        /// The step that fell back.
        step: Step,
        /// Why the fallback was used.
        cause: FallbackCause,
    },
}

/// Handler for pipeline events.
///
/// Entirely optional — the pipeline runs without one.
///
/// # Example
///
/// ```
/// use learnpath::events::{Event, EventHandler};
///
/// struct PrintHandler;
///
/// impl EventHandler for PrintHandler {
///     fn on_event(&self, event: Event) {
///         match event {
///             Event::StageStart { step } => println!("[start] {}", step),
///             Event::StageEnd { step } => println!("[done]  {}", step),
///             Event::Fallback { step, cause } => {
///                 println!("[fallback] {}: {:?}", step, cause)
///             }
///             Event::TopicDetailed { index, name } => {
///                 println!("  detail {}: {}", index + 1, name)
///             }
///         }
///     }
/// }
/// ```
pub trait EventHandler: Send + Sync {
    /// Called for each emitted event.
    fn on_event(&self, event: Event);
}

/// Emit an event if a handler is present. No-op otherwise.
pub(crate) fn emit(handler: &Option<Arc<dyn EventHandler>>, event: Event) {
    if let Some(ref h) = handler {
        h.on_event(event);
    }
}

/// An [`EventHandler`] backed by a closure.
///
/// # Example
///
/// ```
/// use learnpath::events::{Event, FnEventHandler};
/// use std::sync::Arc;
///
/// let handler = Arc::new(FnEventHandler(|event: Event| {
///     if let Event::StageStart { step } = event {
///         println!("starting {}", step);
///     }
/// }));
/// ```
pub struct FnEventHandler<F: Fn(Event) + Send + Sync>(pub F);

impl<F: Fn(Event) + Send + Sync> EventHandler for FnEventHandler<F> {
    fn on_event(&self, event: Event) {
        (self.0)(event);
    }
}
