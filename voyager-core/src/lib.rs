//! Voyager Passport Engine
//!
//! Platform-agnostic core of the Voyager digital passport: the game catalog,
//! the monotonic progress state machine, session bootstrap, the completion
//! trigger, mini-game rules and the ports the browser app implements.
//! This crate has no UI or browser dependencies.

pub mod adapter;
pub mod admin;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod identity;
pub mod maze;
pub mod memory;
pub mod metadata;
pub mod minigames;
pub mod pipeline;
pub mod ports;
pub mod progress;
pub mod runtime;
pub mod services;
pub mod session;
pub mod status;
pub mod view;

// Re-export commonly used types
pub use adapter::{AuditRecord, CompletionEvent, GameFinish, on_game_finished};
pub use admin::{AdminOverview, AdminUserRow};
pub use catalog::{CatalogError, GameCatalog, GameDescriptor, GameId, GameKind};
pub use config::{ConfigError, PassportConfig};
pub use controller::{Action, Effect, PassportController, TimerId};
pub use identity::{Credentials, Email, ValidationError, passport_code};
pub use maze::{Direction, Maze, MazeConfig, MazeRun, MazeScenario, RunState};
pub use metadata::{CertificationClaim, GameMetadata, MazeStats};
pub use minigames::{
    CURRENCY_FIELD, CertificationConfig, CertificationDomain, ErrorSpotConfig,
    ErrorSpotScenario, FlowConfig, MatchConfig, MiniGameConfig, OrderLine, PurchaseOrder,
    QuizConfig, SapModule, TapConfig, TapScore, VENDOR_FIELD, WheelConfig, WheelOption,
    WheelQuestion,
};
pub use pipeline::{CompletionTrigger, crossed_all_won};
pub use ports::{
    AdminSnapshot, AuditLog, CacheError, CompletionNotice, IdentityStore, Notifier, NotifyError,
    SessionCache, StoreError, UserProgressRow,
};
pub use progress::{ProgressError, ProgressMap, ProgressRow, all_won, apply_outcome};
pub use runtime::{EffectRunner, PassportRuntime, Ports, TaskSpawner, TimerScheduler};
pub use services::{BootstrapOutcome, LoginError, bootstrap, load_admin_overview, login};
pub use session::{CachedSession, UserId, UserRecord, UserSession};
pub use status::{GameStatus, Outcome};
pub use view::{View, ViewInputs, select_view};

use std::rc::Rc;

/// Entry point that owns the static configuration and wires runtimes.
#[derive(Debug, Clone, Default)]
pub struct PassportEngine {
    catalog: GameCatalog,
    config: PassportConfig,
}

impl PassportEngine {
    #[must_use]
    pub fn new(catalog: GameCatalog, config: PassportConfig) -> Self {
        Self { catalog, config }
    }

    /// Engine over the catalog and config embedded with the web assets.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::new(
            GameCatalog::load_from_static(),
            PassportConfig::load_from_static(),
        )
    }

    #[must_use]
    pub const fn catalog(&self) -> &GameCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn config(&self) -> &PassportConfig {
        &self.config
    }

    #[must_use]
    pub fn controller(&self) -> PassportController {
        PassportController::new(self.catalog.clone(), self.config.clone())
    }

    /// Build a runtime whose effects run against `ports`.
    #[must_use]
    pub fn runtime(
        &self,
        ports: Ports,
        spawner: Rc<dyn TaskSpawner>,
        timers: Rc<dyn TimerScheduler>,
    ) -> PassportRuntime {
        PassportRuntime::new(
            self.controller(),
            EffectRunner::new(ports, spawner, timers),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{InMemoryStore, ManualScheduler, MemoryCache, PoolSpawner, RecordingNotifier};

    #[test]
    fn engine_wires_a_runtime_that_reaches_auth() {
        let engine = PassportEngine::load_from_static();
        assert_eq!(engine.catalog().len(), 6);
        let store = InMemoryStore::new();
        let ports = Ports {
            store: Rc::new(store.clone()),
            audit: Rc::new(store),
            notifier: Rc::new(RecordingNotifier::new()),
            cache: Rc::new(MemoryCache::new()),
        };
        let runtime = engine.runtime(
            ports,
            Rc::new(PoolSpawner::new()),
            Rc::new(ManualScheduler::new()),
        );
        assert_eq!(runtime.with_controller(PassportController::view), View::Loading);
        runtime.dispatch(Action::BootstrapFinished(BootstrapOutcome::LoggedOut));
        assert_eq!(runtime.with_controller(PassportController::view), View::Auth);
    }
}
