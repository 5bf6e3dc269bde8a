use std::sync::{Mutex, PoisonError};

use tracing::info;

pub const LOGIN_PATH: &str = "/login/";

/// Leaves the app for another location, the way `window.location` would.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, path: &str) {
        info!("navigating to {path}");
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<String> {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_owned());
    }
}
