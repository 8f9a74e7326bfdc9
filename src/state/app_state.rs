//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::config::Config;
use crate::services::{AnalysisStore, TransactionPipeline};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<TransactionPipeline>,
    pub store: Arc<AnalysisStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        pipeline: Arc<TransactionPipeline>,
        store: Arc<AnalysisStore>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            pipeline,
            store,
            config,
        }
    }
}

impl FromRef<AppState> for Arc<TransactionPipeline> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.pipeline.clone()
    }
}

impl FromRef<AppState> for Arc<AnalysisStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for Arc<Config> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
