//! Example: running the pipeline with no generation backend at all.
//!
//! Every stage substitutes its documented fallback, so the output is a
//! complete (if generic) plan with `(LLM not available)` markers.
//!
//! Run with: `cargo run --example offline_plan`

use learnpath::{LearningFormat, LearningPlanner, PlanCtx, PlanRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = PlanCtx::offline();

    let request = PlanRequest::new(
        "Python Programming",
        "complete beginner",
        LearningFormat::Video,
    );

    let plan = LearningPlanner::new().run(&ctx, request).await?;

    println!("Current level: {}", plan.gap.current_level);
    println!("Duration:      {}", plan.outline.duration_estimate);
    println!("Main topics:");
    for (detail, topic) in plan.topic_details.iter().zip(&plan.outline.main_topics) {
        println!("  - {}: {}", topic, detail.description);
    }
    println!("Path: {}", plan.composed.learning_path);

    Ok(())
}
