use std::rc::Rc;

use thiserror::Error;
use voyager_core::memory::{InMemoryStore, RecordingNotifier};
use voyager_core::{
    AuditLog, IdentityStore, MiniGameConfig, Notifier, PassportConfig, PassportEngine,
    PassportRuntime, Ports,
};

use crate::adapters::{BrowserTimers, HttpNotifier, LocalStorageCache, RestStore, WasmSpawner};
use crate::endpoints::Endpoints;

#[derive(Debug, Error)]
pub enum WiringError {
    #[error("mini-game content is malformed: {0}")]
    MiniGames(#[from] serde_json::Error),
}

/// Everything the app shell needs, built once at mount.
pub struct Wiring {
    pub engine: PassportEngine,
    pub minigames: Rc<MiniGameConfig>,
    pub runtime: PassportRuntime,
    pub offline: bool,
}

impl Wiring {
    /// # Errors
    ///
    /// Returns [`WiringError::MiniGames`] if the embedded mini-game content
    /// does not parse.
    pub fn new(endpoints: &Endpoints) -> Result<Self, WiringError> {
        let engine = PassportEngine::load_from_static();
        let minigames = Rc::new(MiniGameConfig::load_from_static()?);
        let ports = build_ports(endpoints, engine.config());
        let runtime = engine.runtime(
            ports,
            Rc::new(WasmSpawner),
            Rc::new(BrowserTimers::new()),
        );
        Ok(Self {
            engine,
            minigames,
            runtime,
            offline: endpoints.is_offline(),
        })
    }
}

impl PartialEq for Wiring {
    fn eq(&self, other: &Self) -> bool {
        self.runtime == other.runtime
    }
}

/// Pick adapters for the configured endpoints. Without a store URL the app
/// keeps accounts in memory for the lifetime of the tab.
#[must_use]
pub fn build_ports(endpoints: &Endpoints, config: &PassportConfig) -> Ports {
    let (store, audit): (Rc<dyn IdentityStore>, Rc<dyn AuditLog>) = match &endpoints.store {
        Some(endpoint) => {
            let rest = Rc::new(RestStore::new(&endpoint.url, &endpoint.key));
            let store: Rc<dyn IdentityStore> = rest.clone();
            (store, rest)
        }
        None => {
            log::info!("no store configured; running with an in-memory store");
            let memory = Rc::new(InMemoryStore::new());
            let store: Rc<dyn IdentityStore> = memory.clone();
            (store, memory)
        }
    };
    let notifier: Rc<dyn Notifier> = match &endpoints.notifier_url {
        Some(url) => Rc::new(HttpNotifier::new(url)),
        None => {
            log::info!("no notifier configured; completion notices stay local");
            Rc::new(RecordingNotifier::new())
        }
    };
    Ports {
        store,
        audit,
        notifier,
        cache: Rc::new(LocalStorageCache::new(config.cache_key.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voyager_core::View;

    #[test]
    fn offline_wiring_starts_in_loading() {
        let wiring = Wiring::new(&Endpoints::default()).unwrap();
        assert!(wiring.offline);
        assert_eq!(wiring.runtime.with_controller(|c| c.view()), View::Loading);
        assert_eq!(wiring.engine.catalog().len(), 6);
    }

    #[test]
    fn wirings_compare_by_runtime_identity() {
        let a = Wiring::new(&Endpoints::default()).unwrap();
        let b = Wiring::new(&Endpoints::default()).unwrap();
        assert!(a == a);
        assert!(a != b);
    }
}
