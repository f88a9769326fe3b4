// InsightFlow - AI-powered insight generation over uploaded tabular data

pub mod config;
pub mod types;
pub mod models;
pub mod normalize;
pub mod prompt;
pub mod llm;
pub mod agents;
pub mod routes;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
