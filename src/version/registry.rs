//! Lookup of backends by the tag stored in `Project::backend`

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::config::MonitorConfig;
use crate::version::backend::Backend;
use crate::version::backends::PagureBackend;
use crate::version::http::HttpClient;

#[derive(Default)]
pub struct BackendRegistry {
    backends: HashMap<&'static str, Arc<dyn Backend>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every built-in backend enabled in `config`, all sharing `client`
    pub fn from_config(config: &MonitorConfig, client: Arc<dyn HttpClient>) -> Self {
        let mut registry = Self::new();

        if config.backends.pagure.enabled {
            registry.register(Arc::new(PagureBackend::new(client)));
        }

        registry
    }

    /// Registers a backend under its name, replacing any previous one
    pub fn register(&mut self, backend: Arc<dyn Backend>) {
        debug!("Registering backend {}", backend.name());
        self.backends.insert(backend.name(), backend);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Backend>> {
        self.backends.get(name).cloned()
    }

    /// Registered backend names in alphabetical order
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.backends.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
