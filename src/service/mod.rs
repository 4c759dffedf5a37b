pub mod assessment;
pub mod assistant;
pub mod classifier;
pub mod history;
pub mod identity;
pub mod recommendation;
pub mod scoring;

pub use assessment::AssessmentService;
pub use classifier::{ClassifierPort, LogisticClassifier};
pub use history::{HistoryStore, InMemoryHistoryStore};
pub use identity::{IdentityProvider, InMemoryUserStore, TokenIdentityProvider, UserStore};
