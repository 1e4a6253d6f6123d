use std::sync::Arc;

use crate::db::{HistoryWriter, ScanHistoryStore};
use crate::services::classifier::HairClassifier;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn HairClassifier>,
    pub store: Arc<dyn ScanHistoryStore>,
    pub history_writer: HistoryWriter,
}

impl AppState {
    pub fn new(
        classifier: Arc<dyn HairClassifier>,
        store: Arc<dyn ScanHistoryStore>,
        history_writer: HistoryWriter,
    ) -> Self {
        Self {
            classifier,
            store,
            history_writer,
        }
    }
}
