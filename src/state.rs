use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::services::ai::LlmProvider;
use crate::services::edit_gate::EditGate;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub llm: Box<dyn LlmProvider>,
}

impl AppState {
    /// Locks the connection. Never hold the guard across an `.await`.
    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>, AppError> {
        self.db
            .lock()
            .map_err(|_| AppError::Database(anyhow::anyhow!("database mutex poisoned")))
    }

    pub fn edit_gate(&self) -> EditGate {
        EditGate::new(
            self.config.edit_min_length_ratio,
            self.config.edit_min_line_overlap,
        )
    }
}
