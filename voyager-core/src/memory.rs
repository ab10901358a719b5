//! In-memory collaborators.
//!
//! Used by the test suites and for running the app without a backend. Every
//! type is a cheap `Rc` handle: clone it into the runtime and keep a copy to
//! inspect what happened.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;

use crate::adapter::AuditRecord;
use crate::catalog::GameId;
use crate::controller::TimerId;
use crate::identity::{Email, passport_code};
use crate::ports::{
    AdminSnapshot, AuditLog, CacheError, CompletionNotice, IdentityStore, Notifier, NotifyError,
    SessionCache, StoreError, UserProgressRow,
};
use crate::progress::ProgressRow;
use crate::runtime::{TaskSpawner, TimerScheduler};
use crate::session::{CachedSession, UserId, UserRecord};
use crate::status::GameStatus;

#[derive(Debug, Default)]
struct StoreState {
    users: BTreeMap<Email, UserRecord>,
    progress: BTreeMap<(UserId, GameId), GameStatus>,
    sessions: Vec<AuditRecord>,
    next_id: u64,
}

/// Identity store and audit log backed by maps.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Rc<RefCell<StoreState>>,
    offline: Rc<Cell<bool>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail with a transport error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    /// Insert an account directly.
    pub fn seed_user(&self, email: &Email, name: &str, is_admin: bool) -> UserRecord {
        let mut state = self.state.borrow_mut();
        let record = new_record(&mut state, email, name, is_admin);
        state.users.insert(email.clone(), record.clone());
        record
    }

    pub fn seed_progress(&self, user_id: &UserId, game_id: GameId, status: GameStatus) {
        self.state
            .borrow_mut()
            .progress
            .insert((user_id.clone(), game_id), status);
    }

    #[must_use]
    pub fn stored_status(&self, user_id: &UserId, game_id: GameId) -> Option<GameStatus> {
        self.state
            .borrow()
            .progress
            .get(&(user_id.clone(), game_id))
            .copied()
    }

    #[must_use]
    pub fn sessions(&self) -> Vec<AuditRecord> {
        self.state.borrow().sessions.clone()
    }

    #[must_use]
    pub fn user_count(&self) -> usize {
        self.state.borrow().users.len()
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.get() {
            Err(StoreError::Transport("store offline".into()))
        } else {
            Ok(())
        }
    }
}

fn new_record(state: &mut StoreState, email: &Email, name: &str, is_admin: bool) -> UserRecord {
    state.next_id += 1;
    UserRecord {
        id: UserId(format!("user-{}", state.next_id)),
        email: email.clone(),
        name: name.to_string(),
        is_admin,
        passport_id: passport_code(email),
    }
}

#[async_trait(?Send)]
impl IdentityStore for InMemoryStore {
    async fn resolve_or_create_user(
        &self,
        email: &Email,
        name: &str,
    ) -> Result<UserRecord, StoreError> {
        self.check_online()?;
        let mut state = self.state.borrow_mut();
        if let Some(existing) = state.users.get(email) {
            return Ok(existing.clone());
        }
        let record = new_record(&mut state, email, name, false);
        state.users.insert(email.clone(), record.clone());
        Ok(record)
    }

    async fn find_user(&self, email: &Email) -> Result<Option<UserRecord>, StoreError> {
        self.check_online()?;
        Ok(self.state.borrow().users.get(email).cloned())
    }

    async fn fetch_progress(&self, user_id: &UserId) -> Result<Vec<ProgressRow>, StoreError> {
        self.check_online()?;
        Ok(self
            .state
            .borrow()
            .progress
            .iter()
            .filter(|((owner, _), _)| owner == user_id)
            .map(|((_, game_id), status)| ProgressRow {
                game_id: *game_id,
                status: *status,
            })
            .collect())
    }

    async fn upsert_progress(
        &self,
        user_id: &UserId,
        game_id: GameId,
        status: GameStatus,
    ) -> Result<(), StoreError> {
        self.check_online()?;
        self.seed_progress(user_id, game_id, status);
        Ok(())
    }

    async fn fetch_all_users_and_progress(&self) -> Result<AdminSnapshot, StoreError> {
        self.check_online()?;
        let state = self.state.borrow();
        Ok(AdminSnapshot {
            users: state.users.values().cloned().collect(),
            progress: state
                .progress
                .iter()
                .map(|((user_id, game_id), status)| UserProgressRow {
                    user_id: user_id.clone(),
                    game_id: *game_id,
                    status: *status,
                })
                .collect(),
        })
    }
}

#[async_trait(?Send)]
impl AuditLog for InMemoryStore {
    async fn append_session(&self, record: &AuditRecord) -> Result<(), StoreError> {
        self.check_online()?;
        self.state.borrow_mut().sessions.push(record.clone());
        Ok(())
    }
}

/// Device cache held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entry: Rc<RefCell<Option<CachedSession>>>,
    corrupt: Rc<Cell<bool>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_session(session: CachedSession) -> Self {
        let cache = Self::default();
        *cache.entry.borrow_mut() = Some(session);
        cache
    }

    /// Simulate an unreadable entry; cleared by the next write or clear.
    pub fn set_corrupt(&self) {
        self.corrupt.set(true);
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<CachedSession> {
        self.entry.borrow().clone()
    }
}

impl SessionCache for MemoryCache {
    fn read_last_session(&self) -> Result<Option<CachedSession>, CacheError> {
        if self.corrupt.get() {
            return Err(CacheError::Corrupt("unparseable entry".into()));
        }
        Ok(self.entry.borrow().clone())
    }

    fn write_last_session(&self, session: &CachedSession) -> Result<(), CacheError> {
        self.corrupt.set(false);
        *self.entry.borrow_mut() = Some(session.clone());
        Ok(())
    }

    fn clear_last_session(&self) -> Result<(), CacheError> {
        self.corrupt.set(false);
        self.entry.borrow_mut().take();
        Ok(())
    }
}

/// Notifier that records every notice it is asked to send.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Rc<RefCell<Vec<CompletionNotice>>>,
    failing: Rc<Cell<bool>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every send; the attempt is still recorded.
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    #[must_use]
    pub fn sent(&self) -> Vec<CompletionNotice> {
        self.sent.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Notifier for RecordingNotifier {
    async fn send_completion_notice(&self, notice: &CompletionNotice) -> Result<(), NotifyError> {
        self.sent.borrow_mut().push(notice.clone());
        if self.failing.get() {
            Err(NotifyError::Status(500))
        } else {
            Ok(())
        }
    }
}

/// Spawner backed by a single-threaded `LocalPool`.
pub struct PoolSpawner {
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
}

impl PoolSpawner {
    #[must_use]
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            pool: RefCell::new(pool),
            spawner,
        }
    }

    /// Drive every queued task until none can make progress.
    pub fn run_until_stalled(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }
}

impl Default for PoolSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskSpawner for PoolSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        if let Err(err) = self.spawner.spawn_local(task) {
            log::error!("could not spawn task: {err}");
        }
    }
}

type PendingTimer = (TimerId, Duration, Box<dyn FnOnce()>);

/// Timers that only fire when the test says so.
#[derive(Default)]
pub struct ManualScheduler {
    pending: RefCell<Vec<PendingTimer>>,
    cancelled: RefCell<Vec<TimerId>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pending(&self) -> Vec<(TimerId, Duration)> {
        self.pending
            .borrow()
            .iter()
            .map(|(timer, delay, _)| (*timer, *delay))
            .collect()
    }

    #[must_use]
    pub fn cancelled(&self) -> Vec<TimerId> {
        self.cancelled.borrow().clone()
    }

    /// Fire every pending timer; returns how many fired.
    pub fn fire_all(&self) -> usize {
        let due: Vec<PendingTimer> = self.pending.borrow_mut().drain(..).collect();
        let count = due.len();
        for (_, _, fire) in due {
            fire();
        }
        count
    }
}

impl TimerScheduler for ManualScheduler {
    fn schedule(&self, timer: TimerId, delay: Duration, fire: Box<dyn FnOnce()>) {
        self.pending.borrow_mut().push((timer, delay, fire));
    }

    fn cancel(&self, timer: TimerId) {
        self.pending.borrow_mut().retain(|(id, _, _)| *id != timer);
        self.cancelled.borrow_mut().push(timer);
    }
}
