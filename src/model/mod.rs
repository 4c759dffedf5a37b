pub mod assessment;
pub mod config;
pub mod recommendation;
pub mod user;

pub use assessment::*;
pub use config::{Config, HistoryBackend};
pub use recommendation::{Priority, RecommendationRecord};
pub use user::*;
