//! Business logic services for the fraud analysis pipeline

pub mod analysis_store;
pub mod classifier;
pub mod notification;
pub mod pipeline;

pub use analysis_store::AnalysisStore;
pub use classifier::RiskClassifier;
pub use notification::NotificationPolicy;
pub use pipeline::TransactionPipeline;
