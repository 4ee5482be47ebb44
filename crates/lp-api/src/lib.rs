pub mod config;
pub mod error;
pub mod group;
pub mod metrics;
pub mod middleware;
pub mod pagination;
pub mod resource;
pub mod router;
pub mod state;
pub mod study_activity;
pub mod study_session;
pub mod tracing;
pub mod v1;
pub mod validation;
pub mod word;
pub mod word_review_item;
pub mod words_group;

pub use config::ApiConfig;
pub use state::ApiState;
