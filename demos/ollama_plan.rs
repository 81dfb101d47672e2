//! Example: generating a plan against a live Ollama endpoint.
//!
//! Requires Ollama running locally (`ollama serve`) with the model
//! pulled. Configure via `OLLAMA_HOST` and `LEARNPATH_MODEL`, or fall
//! back to the defaults.
//!
//! Run with: `cargo run --example ollama_plan`

use learnpath::events::{Event, FnEventHandler};
use learnpath::{LearningFormat, LearningPlanner, PlanCtx, PlanRequest};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let handler = Arc::new(FnEventHandler(|event: Event| match event {
        Event::StageStart { step } => println!("-> {}", step),
        Event::TopicDetailed { index, name } => println!("   detail {}: {}", index + 1, name),
        Event::Fallback { step, cause } => println!("   fallback at {}: {:?}", step, cause),
        Event::StageEnd { .. } => {}
    }));

    let ctx = match std::env::var("OLLAMA_HOST") {
        Ok(host) => PlanCtx::builder(host).event_handler(handler).build(),
        Err(_) => PlanCtx::builder("http://localhost:11434")
            .event_handler(handler)
            .build(),
    };

    let request = PlanRequest::new(
        "Machine Learning",
        "undergraduate math, comfortable with Python",
        LearningFormat::Video,
    );

    let plan = LearningPlanner::new().run(&ctx, request).await?;

    println!("\n=== Learning plan ===");
    println!("{}", serde_json::to_string_pretty(&plan)?);

    Ok(())
}
