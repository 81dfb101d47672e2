//! Example: driving the full pipeline with canned responses.
//!
//! The mock returns one response per stage call in order: gap analysis,
//! topic planning, one detailing call per main topic, then combination.
//!
//! Run with: `cargo run --example mock_plan`

use learnpath::{LearningFormat, LearningPlanner, MockGenerator, PlanCtx, PlanRequest};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mock = MockGenerator::new(vec![
        r#"{"identified_gaps": ["ownership", "the trait system"],
            "current_level": "productive in Python",
            "target_level": "can ship a small Rust service",
            "gap_analysis": "no exposure to compile-time memory management"}"#
            .to_string(),
        r#"{"main_topics": ["Ownership", "Traits"],
            "subtopics": ["moves", "borrows", "generics"],
            "learning_objectives": ["Explain the borrow checker", "Design with trait bounds"],
            "estimated_duration": "4 weeks"}"#
            .to_string(),
        r#"{"topic_name": "Ownership", "description": "Moves, borrows, lifetimes",
            "resources": ["The Rust Book ch. 4"], "exercises": ["rustlings: move_semantics"],
            "assessment_criteria": "Predict borrow checker errors on sight"}"#
            .to_string(),
        r#"{"topic_name": "Traits", "description": "Shared behavior and generics",
            "resources": ["The Rust Book ch. 10"], "exercises": ["implement Display and Iterator"],
            "assessment_criteria": "Choose between generics and trait objects"}"#
            .to_string(),
        r#"{"learning_path": "Ownership first, then traits, then a capstone CLI",
            "recommended_resources": ["The Rust Book", "rustlings"],
            "timeline": "4 weeks, 5 hours per week",
            "success_metrics": ["rustlings complete", "capstone CLI ships"]}"#
            .to_string(),
    ]);

    let ctx = PlanCtx::builder("http://unused")
        .generator(Arc::new(mock))
        .build();

    let request = PlanRequest::new(
        "Rust",
        "two years of Python, no systems languages",
        LearningFormat::Text,
    );

    let plan = LearningPlanner::new().run(&ctx, request).await?;
    println!("{}", serde_json::to_string_pretty(&plan)?);

    Ok(())
}
