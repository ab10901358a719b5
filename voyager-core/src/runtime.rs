//! Executes controller effects against the injected collaborators.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use futures::future::FutureExt;
pub use futures::future::LocalBoxFuture;

use crate::controller::{Action, Effect, PassportController, TimerId};
use crate::ports::{AuditLog, IdentityStore, Notifier, SessionCache};

/// Runs fire-and-forget work on the host's event loop.
pub trait TaskSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

/// One-shot cancellable timers.
pub trait TimerScheduler {
    fn schedule(&self, timer: TimerId, delay: Duration, fire: Box<dyn FnOnce()>);
    fn cancel(&self, timer: TimerId);
}

/// Collaborators needed to carry out effects.
#[derive(Clone)]
pub struct Ports {
    pub store: Rc<dyn IdentityStore>,
    pub audit: Rc<dyn AuditLog>,
    pub notifier: Rc<dyn Notifier>,
    pub cache: Rc<dyn SessionCache>,
}

#[derive(Clone)]
pub struct EffectRunner {
    ports: Ports,
    spawner: Rc<dyn TaskSpawner>,
    timers: Rc<dyn TimerScheduler>,
}

impl EffectRunner {
    #[must_use]
    pub fn new(ports: Ports, spawner: Rc<dyn TaskSpawner>, timers: Rc<dyn TimerScheduler>) -> Self {
        Self {
            ports,
            spawner,
            timers,
        }
    }

    #[must_use]
    pub const fn ports(&self) -> &Ports {
        &self.ports
    }

    /// Carry out `effects` in order. Network failures are logged and dropped;
    /// nothing here can fail the caller. `on_timer` is invoked when a scheduled
    /// badge timer fires.
    pub fn run<F>(&self, effects: impl IntoIterator<Item = Effect>, on_timer: F)
    where
        F: Fn(TimerId) + Clone + 'static,
    {
        for effect in effects {
            match effect {
                Effect::PersistProgress {
                    user_id,
                    game_id,
                    status,
                } => {
                    let store = Rc::clone(&self.ports.store);
                    self.spawner.spawn(
                        async move {
                            if let Err(err) = store.upsert_progress(&user_id, game_id, status).await
                            {
                                log::warn!("progress write for game {game_id} failed: {err}");
                            }
                        }
                        .boxed_local(),
                    );
                }
                Effect::RecordSession(record) => {
                    let audit = Rc::clone(&self.ports.audit);
                    self.spawner.spawn(
                        async move {
                            if let Err(err) = audit.append_session(&record).await {
                                log::warn!("audit write for game {} failed: {err}", record.game_id);
                            }
                        }
                        .boxed_local(),
                    );
                }
                Effect::SendNotice(notice) => {
                    let notifier = Rc::clone(&self.ports.notifier);
                    self.spawner.spawn(
                        async move {
                            match notifier.send_completion_notice(&notice).await {
                                Ok(()) => log::info!("completion notice sent to {}", notice.identity),
                                Err(err) => log::warn!("completion notice failed: {err}"),
                            }
                        }
                        .boxed_local(),
                    );
                }
                Effect::ScheduleBadge { timer, delay } => {
                    let on_timer = on_timer.clone();
                    self.timers
                        .schedule(timer, delay, Box::new(move || on_timer(timer)));
                }
                Effect::CancelTimer(timer) => self.timers.cancel(timer),
                Effect::WriteCache(cached) => {
                    if let Err(err) = self.ports.cache.write_last_session(&cached) {
                        log::warn!("could not cache session: {err}");
                    }
                }
                Effect::ClearCache => {
                    if let Err(err) = self.ports.cache.clear_last_session() {
                        log::warn!("could not clear cached session: {err}");
                    }
                }
            }
        }
    }
}

struct RuntimeInner {
    controller: RefCell<PassportController>,
    runner: EffectRunner,
    listener: RefCell<Option<Rc<dyn Fn()>>>,
}

/// Shared handle pairing a controller with its effect runner.
///
/// Cloning is cheap; all clones drive the same controller. Timer callbacks hold
/// a weak reference, so dropping every handle disarms them.
#[derive(Clone)]
pub struct PassportRuntime {
    inner: Rc<RuntimeInner>,
}

impl PassportRuntime {
    #[must_use]
    pub fn new(controller: PassportController, runner: EffectRunner) -> Self {
        Self {
            inner: Rc::new(RuntimeInner {
                controller: RefCell::new(controller),
                runner,
                listener: RefCell::new(None),
            }),
        }
    }

    /// Called after every dispatch so the host can re-render.
    pub fn set_listener(&self, listener: impl Fn() + 'static) {
        *self.inner.listener.borrow_mut() = Some(Rc::new(listener));
    }

    #[must_use]
    pub fn runner(&self) -> &EffectRunner {
        &self.inner.runner
    }

    pub fn with_controller<R>(&self, read: impl FnOnce(&PassportController) -> R) -> R {
        read(&self.inner.controller.borrow())
    }

    pub fn dispatch(&self, action: Action) {
        let effects = self.inner.controller.borrow_mut().dispatch(action);
        let weak: Weak<RuntimeInner> = Rc::downgrade(&self.inner);
        self.inner.runner.run(effects, move |timer| {
            if let Some(inner) = weak.upgrade() {
                Self { inner }.dispatch(Action::BadgeTimerFired(timer));
            }
        });
        let listener = self.inner.listener.borrow().clone();
        if let Some(listener) = listener {
            listener();
        }
    }
}

impl PartialEq for PassportRuntime {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
