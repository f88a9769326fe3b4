//! Insight Pipeline
//!
//! The request orchestrator behind the two externally facing operations.
//! Each call is a short state-free pipeline with exactly one suspension
//! point, the model invocation:
//!
//! ```text
//! file bytes / raw text
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Normalize  │  → single UTF-8 payload
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────┐
//! │   Prompt    │  → rendered template + output field
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────┐
//! │     LLM     │  → one structured invocation
//! └─────────────┘
//!      │
//!      ▼
//!  insight text
//! ```

pub mod insight;

pub use insight::InsightAgent;
