// Shared application state
// One instance per process, shared across connections behind an Arc

use std::sync::Arc;

use crate::config::Config;
use crate::convert::{MeshConverter, PlaceholderConverter};

pub struct AppState {
    pub config: Config,
    pub converter: Arc<dyn MeshConverter>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            converter: Arc::new(PlaceholderConverter),
        }
    }

    /// Substitute a different conversion backend.
    pub fn with_converter(config: Config, converter: Arc<dyn MeshConverter>) -> Self {
        Self { config, converter }
    }
}
