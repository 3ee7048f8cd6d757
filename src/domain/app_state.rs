use std::sync::Arc;

use super::entities::RefiningData;

/// UI-wide state shared through context.
#[derive(Clone, Debug)]
pub struct AppState {
    pub data: Option<Arc<RefiningData>>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }
}

impl AppState {
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish_load(&mut self, result: Result<Arc<RefiningData>, String>) {
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(message) => self.error = Some(message),
        }
    }
}
