//! The passport controller.
//!
//! A synchronous reducer over [`Action`]s. All state lives here; side effects
//! come back as [`Effect`] values for an [`crate::runtime::EffectRunner`] to
//! execute, so every transition can be tested without a browser.

use std::time::Duration;

use crate::adapter::{AuditRecord, GameFinish, on_game_finished};
use crate::catalog::{GameCatalog, GameId};
use crate::config::PassportConfig;
use crate::pipeline::{CompletionTrigger, crossed_all_won};
use crate::ports::CompletionNotice;
use crate::services::BootstrapOutcome;
use crate::session::{CachedSession, UserId, UserSession};
use crate::status::GameStatus;
use crate::view::{View, ViewInputs, select_view};

/// Handle for a scheduled badge transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// Side effect requested by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    PersistProgress {
        user_id: UserId,
        game_id: GameId,
        status: GameStatus,
    },
    RecordSession(AuditRecord),
    SendNotice(CompletionNotice),
    ScheduleBadge {
        timer: TimerId,
        delay: Duration,
    },
    CancelTimer(TimerId),
    WriteCache(CachedSession),
    ClearCache,
}

/// Inputs to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    BootstrapFinished(BootstrapOutcome),
    LoggedIn(UserSession),
    GameFinished(GameFinish),
    BadgeTimerFired(TimerId),
    Logout,
    /// The host is going away; release the pending timer.
    Teardown,
}

#[derive(Debug, Clone)]
pub struct PassportController {
    catalog: GameCatalog,
    config: PassportConfig,
    bootstrapping: bool,
    session: Option<UserSession>,
    trigger: CompletionTrigger,
    celebrating: bool,
    show_badge: bool,
    pending_timer: Option<TimerId>,
    next_timer: u64,
    reward_link: Option<String>,
}

impl PassportController {
    /// A controller waiting for the bootstrap result.
    #[must_use]
    pub fn new(catalog: GameCatalog, config: PassportConfig) -> Self {
        Self {
            catalog,
            config,
            bootstrapping: true,
            session: None,
            trigger: CompletionTrigger::default(),
            celebrating: false,
            show_badge: false,
            pending_timer: None,
            next_timer: 0,
            reward_link: None,
        }
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
    pub const fn session(&self) -> Option<&UserSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub const fn is_bootstrapping(&self) -> bool {
        self.bootstrapping
    }

    #[must_use]
    pub const fn is_celebrating(&self) -> bool {
        self.celebrating
    }

    #[must_use]
    pub const fn pending_timer(&self) -> Option<TimerId> {
        self.pending_timer
    }

    /// Most recent reward reference claimed this session.
    #[must_use]
    pub fn reward_link(&self) -> Option<&str> {
        self.reward_link.as_deref()
    }

    #[must_use]
    pub fn all_won(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.all_won(&self.catalog))
    }

    #[must_use]
    pub fn view_inputs(&self) -> ViewInputs {
        ViewInputs {
            has_session: self.session.is_some(),
            is_bootstrapping: self.bootstrapping,
            is_admin: self.session.as_ref().is_some_and(|s| s.is_admin),
            show_badge: self.show_badge,
        }
    }

    #[must_use]
    pub fn view(&self) -> View {
        select_view(self.view_inputs())
    }

    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::BootstrapFinished(outcome) => {
                self.bootstrapping = false;
                match outcome {
                    BootstrapOutcome::LoggedOut => {
                        self.reset_session();
                        Vec::new()
                    }
                    BootstrapOutcome::Restored { session, .. } => {
                        self.enter_session(session);
                        Vec::new()
                    }
                }
            }
            Action::LoggedIn(session) => {
                self.bootstrapping = false;
                let effects = self.cancel_pending();
                self.enter_session(session);
                effects
            }
            Action::GameFinished(finish) => self.game_finished(finish),
            Action::BadgeTimerFired(timer) => {
                if self.pending_timer == Some(timer) {
                    self.pending_timer = None;
                    self.celebrating = false;
                    self.show_badge = true;
                } else {
                    log::debug!("ignoring stale badge timer {}", timer.0);
                }
                Vec::new()
            }
            Action::Logout => {
                let mut effects = self.cancel_pending();
                effects.push(Effect::ClearCache);
                self.reset_session();
                effects
            }
            Action::Teardown => self.cancel_pending(),
        }
    }

    fn enter_session(&mut self, session: UserSession) {
        let complete = session.all_won(&self.catalog);
        self.trigger = if complete {
            CompletionTrigger::spent()
        } else {
            CompletionTrigger::default()
        };
        self.show_badge = complete;
        self.celebrating = false;
        self.reward_link = None;
        self.session = Some(session);
    }

    fn reset_session(&mut self) {
        self.session = None;
        self.trigger = CompletionTrigger::default();
        self.celebrating = false;
        self.show_badge = false;
        self.pending_timer = None;
        self.reward_link = None;
    }

    fn cancel_pending(&mut self) -> Vec<Effect> {
        self.pending_timer
            .take()
            .map(Effect::CancelTimer)
            .into_iter()
            .collect()
    }

    fn game_finished(&mut self, finish: GameFinish) -> Vec<Effect> {
        let event = on_game_finished(finish);
        let Some(session) = self.session.as_ref() else {
            log::warn!("game {} finished without a session; ignored", event.game_id);
            return Vec::new();
        };

        let before = session.progress.clone();
        let after = match before.apply(event.game_id, event.outcome) {
            Ok(map) => map,
            Err(err) => {
                log::warn!("discarding completion: {err}");
                return Vec::new();
            }
        };

        if let Some(link) = event.reward_link() {
            self.reward_link = Some(link.to_owned());
        }

        let mut effects = vec![Effect::RecordSession(
            event.audit_record(&session.user_id),
        )];
        let user_id = session.user_id.clone();
        let crossed = crossed_all_won(&before, &after, &self.catalog);
        let changed = after != before;

        let Some(session) = self.session.as_mut() else {
            return effects;
        };
        session.progress = after;

        if changed {
            if let Some(status) = session.progress.status(event.game_id) {
                effects.push(Effect::PersistProgress {
                    user_id,
                    game_id: event.game_id,
                    status,
                });
            }
            effects.push(Effect::WriteCache(session.to_cached()));
        }

        let timer = TimerId(self.next_timer + 1);
        let fired = self.trigger.evaluate(
            crossed,
            session,
            self.reward_link.as_deref(),
            timer,
            self.config.celebration_delay(),
        );
        if let Some(trigger_effects) = fired {
            self.next_timer = timer.0;
            self.celebrating = true;
            self.pending_timer = Some(timer);
            effects.extend(trigger_effects);
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::identity::Email;
    use crate::metadata::{CertificationClaim, GameMetadata};
    use crate::progress::ProgressMap;

    fn controller() -> PassportController {
        PassportController::new(
            GameCatalog::load_from_static(),
            PassportConfig::default_config(),
        )
    }

    fn session(progress: ProgressMap) -> UserSession {
        UserSession {
            user_id: UserId("u-1".into()),
            identity: Email::parse("a@x.com").unwrap(),
            display_name: "Ada".into(),
            is_admin: false,
            passport_id: "144513".into(),
            progress,
        }
    }

    fn finish(id: GameId, won: bool) -> Action {
        Action::GameFinished(GameFinish::bare(id, won, Utc::now()))
    }

    fn logged_in() -> PassportController {
        let mut ctl = controller();
        let fresh = ProgressMap::fresh(ctl.catalog());
        assert!(ctl.dispatch(Action::LoggedIn(session(fresh))).is_empty());
        ctl
    }

    #[test]
    fn starts_on_loading_then_auth() {
        let mut ctl = controller();
        assert_eq!(ctl.view(), View::Loading);
        ctl.dispatch(Action::BootstrapFinished(BootstrapOutcome::LoggedOut));
        assert_eq!(ctl.view(), View::Auth);
    }

    #[test]
    fn participation_is_persisted_and_cached() {
        let mut ctl = logged_in();
        let effects = ctl.dispatch(finish(GameId(2), false));
        assert!(matches!(effects[0], Effect::RecordSession(_)));
        assert!(effects.contains(&Effect::PersistProgress {
            user_id: UserId("u-1".into()),
            game_id: GameId(2),
            status: GameStatus::Participated,
        }));
        assert!(effects.iter().any(|e| matches!(e, Effect::WriteCache(_))));
        assert_eq!(ctl.view(), View::Main);
    }

    #[test]
    fn downgrade_attempt_only_records_audit() {
        let mut ctl = logged_in();
        ctl.dispatch(finish(GameId(1), true));
        let effects = ctl.dispatch(finish(GameId(1), false));
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], Effect::RecordSession(_)));
        assert_eq!(
            ctl.session().unwrap().progress.status(GameId(1)),
            Some(GameStatus::Won)
        );
    }

    #[test]
    fn unknown_game_is_discarded() {
        let mut ctl = logged_in();
        assert!(ctl.dispatch(finish(GameId(99), true)).is_empty());
    }

    #[test]
    fn finishing_without_session_is_ignored() {
        let mut ctl = controller();
        ctl.dispatch(Action::BootstrapFinished(BootstrapOutcome::LoggedOut));
        assert!(ctl.dispatch(finish(GameId(1), true)).is_empty());
    }

    #[test]
    fn winning_everything_celebrates_then_shows_badge() {
        let mut ctl = logged_in();
        let ids: Vec<GameId> = ctl.catalog().ids().collect();
        let mut notices = 0;
        let mut timer = None;
        for id in ids.iter().rev() {
            for effect in ctl.dispatch(finish(*id, true)) {
                match effect {
                    Effect::SendNotice(notice) => {
                        notices += 1;
                        assert_eq!(notice.identity.as_str(), "a@x.com");
                    }
                    Effect::ScheduleBadge { timer: t, delay } => {
                        assert_eq!(delay, Duration::from_millis(2_500));
                        timer = Some(t);
                    }
                    _ => {}
                }
            }
        }
        assert_eq!(notices, 1);
        assert!(ctl.is_celebrating());
        assert_eq!(ctl.view(), View::Main);

        let timer = timer.unwrap();
        ctl.dispatch(Action::BadgeTimerFired(timer));
        assert!(!ctl.is_celebrating());
        assert_eq!(ctl.view(), View::Badge);

        // Replaying a win after completion never re-triggers.
        let effects = ctl.dispatch(finish(ids[0], true));
        assert!(!effects.iter().any(|e| matches!(e, Effect::SendNotice(_))));
    }

    #[test]
    fn reward_link_from_earlier_game_reaches_notice() {
        let mut ctl = logged_in();
        let ids: Vec<GameId> = ctl.catalog().ids().collect();
        let claim = GameFinish::bare(ids[0], true, Utc::now()).with_metadata(
            GameMetadata::Certification(CertificationClaim {
                domain: "Finance".into(),
                voucher: "S/4HANA Finance".into(),
                reward_link: Some("https://example.com/v/1".into()),
            }),
        );
        ctl.dispatch(Action::GameFinished(claim));
        let notice = ids[1..]
            .iter()
            .flat_map(|id| ctl.dispatch(finish(*id, true)))
            .find_map(|effect| match effect {
                Effect::SendNotice(notice) => Some(notice),
                _ => None,
            })
            .unwrap();
        assert_eq!(notice.reward_link.as_deref(), Some("https://example.com/v/1"));
    }

    #[test]
    fn logout_during_celebration_cancels_timer() {
        let mut ctl = logged_in();
        let ids: Vec<GameId> = ctl.catalog().ids().collect();
        for id in &ids {
            ctl.dispatch(finish(*id, true));
        }
        let timer = ctl.pending_timer().unwrap();
        let effects = ctl.dispatch(Action::Logout);
        assert_eq!(effects, vec![Effect::CancelTimer(timer), Effect::ClearCache]);
        assert_eq!(ctl.view(), View::Auth);

        // A late firing after logout changes nothing.
        ctl.dispatch(Action::BadgeTimerFired(timer));
        assert_eq!(ctl.view(), View::Auth);
        assert!(!ctl.is_celebrating());
    }

    #[test]
    fn restored_complete_session_goes_straight_to_badge() {
        let mut ctl = controller();
        let catalog = ctl.catalog().clone();
        let won = catalog.ids().fold(ProgressMap::fresh(&catalog), |map, id| {
            map.apply(id, crate::status::Outcome::Won).unwrap()
        });
        let effects = ctl.dispatch(Action::BootstrapFinished(BootstrapOutcome::Restored {
            session: session(won),
            all_won: true,
        }));
        assert!(effects.is_empty());
        assert_eq!(ctl.view(), View::Badge);

        let effects = ctl.dispatch(finish(GameId(1), true));
        assert!(!effects.iter().any(|e| matches!(e, Effect::SendNotice(_))));
    }

    #[test]
    fn admin_session_selects_admin_view() {
        let mut ctl = controller();
        let mut admin = session(ProgressMap::fresh(ctl.catalog()));
        admin.is_admin = true;
        ctl.dispatch(Action::LoggedIn(admin));
        assert_eq!(ctl.view(), View::Admin);
    }

    #[test]
    fn teardown_releases_pending_timer() {
        let mut ctl = logged_in();
        let ids: Vec<GameId> = ctl.catalog().ids().collect();
        for id in &ids {
            ctl.dispatch(finish(*id, true));
        }
        let timer = ctl.pending_timer().unwrap();
        assert_eq!(ctl.dispatch(Action::Teardown), vec![Effect::CancelTimer(timer)]);
        assert!(ctl.pending_timer().is_none());
    }
}
