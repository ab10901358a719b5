use std::rc::Rc;
use std::time::Duration;

use chrono::Utc;
use futures::executor::block_on;
use voyager_core::memory::{
    InMemoryStore, ManualScheduler, MemoryCache, PoolSpawner, RecordingNotifier,
};
use voyager_core::{
    Action, BootstrapOutcome, CachedSession, Email, GameFinish, GameId, GameStatus, LoginError,
    PassportController, PassportEngine, PassportRuntime, Ports, ValidationError, View, bootstrap,
    login,
};

struct Harness {
    engine: PassportEngine,
    store: InMemoryStore,
    cache: MemoryCache,
    notifier: RecordingNotifier,
    spawner: Rc<PoolSpawner>,
    timers: Rc<ManualScheduler>,
    runtime: PassportRuntime,
}

impl Harness {
    fn new(store: InMemoryStore, cache: MemoryCache) -> Self {
        let engine = PassportEngine::load_from_static();
        let notifier = RecordingNotifier::new();
        let spawner = Rc::new(PoolSpawner::new());
        let timers = Rc::new(ManualScheduler::new());
        let ports = Ports {
            store: Rc::new(store.clone()),
            audit: Rc::new(store.clone()),
            notifier: Rc::new(notifier.clone()),
            cache: Rc::new(cache.clone()),
        };
        let runtime = engine.runtime(ports, spawner.clone(), timers.clone());
        Self {
            engine,
            store,
            cache,
            notifier,
            spawner,
            timers,
            runtime,
        }
    }

    fn fresh() -> Self {
        Self::new(InMemoryStore::new(), MemoryCache::new())
    }

    fn boot(&self) {
        let outcome = block_on(bootstrap(&self.cache, &self.store, self.engine.catalog()));
        self.runtime.dispatch(Action::BootstrapFinished(outcome));
    }

    fn login(&self, email: &str, name: &str) -> Result<(), LoginError> {
        let session = block_on(login(
            &self.store,
            &self.cache,
            self.engine.catalog(),
            email,
            name,
            self.engine.config().name_max_len,
        ))?;
        self.runtime.dispatch(Action::LoggedIn(session));
        Ok(())
    }

    fn finish(&self, id: GameId, won: bool) {
        self.runtime
            .dispatch(Action::GameFinished(GameFinish::bare(id, won, Utc::now())));
        self.spawner.run_until_stalled();
    }

    fn view(&self) -> View {
        self.runtime.with_controller(PassportController::view)
    }

    fn status(&self, id: GameId) -> Option<GameStatus> {
        self.runtime
            .with_controller(|c| c.session().and_then(|s| s.progress.status(id)))
    }

    fn ids(&self) -> Vec<GameId> {
        self.engine.catalog().ids().collect()
    }
}

fn email(raw: &str) -> Email {
    Email::parse(raw).unwrap()
}

#[test]
fn fresh_login_starts_unlocked_on_main() {
    let h = Harness::fresh();
    h.boot();
    assert_eq!(h.view(), View::Auth);

    h.login("a@x.com", "Ada").unwrap();
    assert_eq!(h.view(), View::Main);
    for id in h.ids() {
        assert_eq!(h.status(id), Some(GameStatus::Unlocked));
    }
    let cached = h.cache.snapshot().unwrap();
    assert_eq!(cached.identity.as_str(), "a@x.com");
    assert_eq!(cached.display_name, "Ada");
}

#[test]
fn invalid_login_never_touches_the_store() {
    let h = Harness::fresh();
    h.boot();
    h.store.set_offline(true);

    assert_eq!(
        h.login("not-an-email", "Ada"),
        Err(LoginError::Invalid(ValidationError::InvalidEmail))
    );
    assert_eq!(
        h.login("a@x.com", "   "),
        Err(LoginError::Invalid(ValidationError::EmptyName))
    );
    assert!(matches!(h.login("a@x.com", "Ada"), Err(LoginError::Store(_))));
    assert_eq!(h.view(), View::Auth);
    assert!(h.cache.snapshot().is_none());
}

#[test]
fn winning_every_game_notifies_once_then_shows_badge() {
    let h = Harness::fresh();
    h.boot();
    h.login("a@x.com", "Ada").unwrap();

    let mut ids = h.ids();
    ids.rotate_left(2);
    for id in &ids {
        h.finish(*id, false);
        h.finish(*id, true);
    }

    let sent = h.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].identity.as_str(), "a@x.com");
    assert_eq!(sent[0].display_name, "Ada");
    assert!(h.runtime.with_controller(PassportController::is_celebrating));
    assert_eq!(h.view(), View::Main);

    assert_eq!(
        h.timers
            .pending()
            .iter()
            .map(|(_, delay)| *delay)
            .collect::<Vec<_>>(),
        vec![Duration::from_millis(2_500)]
    );
    assert_eq!(h.timers.fire_all(), 1);
    assert_eq!(h.view(), View::Badge);

    // Stays terminal and silent.
    h.finish(ids[0], true);
    assert_eq!(h.notifier.sent().len(), 1);
    assert_eq!(h.view(), View::Badge);

    let user = h.runtime.with_controller(|c| c.session().unwrap().user_id.clone());
    for id in h.ids() {
        assert_eq!(h.store.stored_status(&user, id), Some(GameStatus::Won));
    }
    assert_eq!(h.store.sessions().len(), ids.len() * 2 + 1);
}

#[test]
fn participation_after_win_keeps_win_everywhere() {
    let h = Harness::fresh();
    h.boot();
    h.login("a@x.com", "Ada").unwrap();
    let id = h.ids()[0];

    h.finish(id, true);
    h.finish(id, false);

    assert_eq!(h.status(id), Some(GameStatus::Won));
    let user = h.runtime.with_controller(|c| c.session().unwrap().user_id.clone());
    assert_eq!(h.store.stored_status(&user, id), Some(GameStatus::Won));
    let cached = h.cache.snapshot().unwrap().progress.unwrap();
    assert_eq!(cached.status(id), Some(GameStatus::Won));
}

#[test]
fn notification_failure_still_records_the_win() {
    let h = Harness::fresh();
    h.boot();
    h.login("a@x.com", "Ada").unwrap();
    h.notifier.set_failing(true);

    for id in h.ids() {
        h.finish(id, true);
    }
    assert_eq!(h.notifier.sent().len(), 1);
    assert!(h.runtime.with_controller(PassportController::all_won));
    h.timers.fire_all();
    assert_eq!(h.view(), View::Badge);
}

#[test]
fn backend_outage_during_play_keeps_session_going() {
    let h = Harness::fresh();
    h.boot();
    h.login("a@x.com", "Ada").unwrap();
    h.store.set_offline(true);

    let id = h.ids()[1];
    h.finish(id, true);
    assert_eq!(h.status(id), Some(GameStatus::Won));
    assert_eq!(h.view(), View::Main);
    assert!(h.store.sessions().is_empty());
}

#[test]
fn bootstrap_with_unknown_identity_fails_closed() {
    let cache = MemoryCache::with_session(CachedSession {
        identity: email("ghost@x.com"),
        display_name: "Ghost".into(),
        progress: None,
    });
    let h = Harness::new(InMemoryStore::new(), cache);
    h.boot();
    assert_eq!(h.view(), View::Auth);
    assert!(h.cache.snapshot().is_none());
}

#[test]
fn bootstrap_with_store_outage_fails_closed() {
    let store = InMemoryStore::new();
    store.seed_user(&email("a@x.com"), "Ada", false);
    store.set_offline(true);
    let cache = MemoryCache::with_session(CachedSession {
        identity: email("a@x.com"),
        display_name: "Ada".into(),
        progress: None,
    });
    let h = Harness::new(store, cache);
    h.boot();
    assert_eq!(h.view(), View::Auth);
    assert!(h.cache.snapshot().is_none());
}

#[test]
fn corrupt_cache_is_cleared_on_bootstrap() {
    let cache = MemoryCache::with_session(CachedSession {
        identity: email("a@x.com"),
        display_name: String::new(),
        progress: None,
    });
    cache.set_corrupt();
    let h = Harness::new(InMemoryStore::new(), cache);
    h.boot();
    assert_eq!(h.view(), View::Auth);
    assert!(h.cache.snapshot().is_none());
}

#[test]
fn bootstrap_replaces_cached_progress_with_server_truth() {
    let store = InMemoryStore::new();
    let user = store.seed_user(&email("a@x.com"), "Ada", false);
    store.seed_progress(&user.id, GameId(2), GameStatus::Participated);
    store.seed_progress(&user.id, GameId(99), GameStatus::Won);

    let engine = PassportEngine::load_from_static();
    let stale = engine
        .catalog()
        .ids()
        .fold(voyager_core::ProgressMap::fresh(engine.catalog()), |m, id| {
            m.apply(id, voyager_core::Outcome::Won).unwrap()
        });
    let cache = MemoryCache::with_session(CachedSession {
        identity: email("A@X.com"),
        display_name: "Stale".into(),
        progress: Some(stale),
    });

    let outcome = block_on(bootstrap(&cache, &store, engine.catalog()));
    let BootstrapOutcome::Restored { session, all_won } = outcome else {
        panic!("expected a restored session");
    };
    assert!(!all_won);
    assert_eq!(session.display_name, "Ada");
    assert_eq!(session.progress.len(), engine.catalog().len());
    assert_eq!(session.progress.status(GameId(2)), Some(GameStatus::Participated));
    assert_eq!(session.progress.status(GameId(1)), Some(GameStatus::Unlocked));
    assert_eq!(session.progress.status(GameId(99)), None);
    assert_eq!(cache.snapshot().unwrap().display_name, "Ada");
}

#[test]
fn bootstrap_with_completed_passport_shows_badge_without_notice() {
    let store = InMemoryStore::new();
    let user = store.seed_user(&email("a@x.com"), "Ada", false);
    let engine = PassportEngine::load_from_static();
    for id in engine.catalog().ids() {
        store.seed_progress(&user.id, id, GameStatus::Won);
    }
    let cache = MemoryCache::with_session(CachedSession {
        identity: email("a@x.com"),
        display_name: "Ada".into(),
        progress: None,
    });
    let h = Harness::new(store, cache);
    h.boot();

    assert_eq!(h.view(), View::Badge);
    h.spawner.run_until_stalled();
    assert!(h.notifier.sent().is_empty());
    assert!(h.timers.pending().is_empty());
}

#[test]
fn logout_during_celebration_cancels_the_badge_timer() {
    let h = Harness::fresh();
    h.boot();
    h.login("a@x.com", "Ada").unwrap();
    for id in h.ids() {
        h.finish(id, true);
    }
    let (timer, _) = h.timers.pending()[0];

    h.runtime.dispatch(Action::Logout);
    assert_eq!(h.timers.cancelled(), vec![timer]);
    assert_eq!(h.timers.fire_all(), 0);
    assert_eq!(h.view(), View::Auth);
    assert!(h.cache.snapshot().is_none());

    // Logging back in does not replay the celebration.
    h.login("a@x.com", "Ada").unwrap();
    assert_eq!(h.view(), View::Badge);
    assert_eq!(h.notifier.sent().len(), 1);
}

#[test]
fn admins_land_on_the_admin_view() {
    let store = InMemoryStore::new();
    store.seed_user(&email("boss@x.com"), "Boss", true);
    let h = Harness::new(store, MemoryCache::new());
    h.boot();
    h.login("boss@x.com", "Boss").unwrap();
    assert_eq!(h.view(), View::Admin);

    let overview = block_on(voyager_core::load_admin_overview(
        &h.store,
        h.engine.catalog(),
    ))
    .unwrap();
    assert_eq!(overview.total_users, 1);
    assert_eq!(overview.fully_completed, 0);
}
