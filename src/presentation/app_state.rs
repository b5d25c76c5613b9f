// Application state for HTTP handlers
use crate::application::history_service::HistoryService;

#[derive(Clone)]
pub struct AppState {
    pub history_service: HistoryService,
}
