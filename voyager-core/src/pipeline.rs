//! Completion trigger: fires once when the passport becomes fully won.

use std::time::Duration;

use crate::catalog::GameCatalog;
use crate::controller::{Effect, TimerId};
use crate::ports::CompletionNotice;
use crate::progress::ProgressMap;
use crate::session::UserSession;

/// True only on the false→true edge of `AllWon`.
#[must_use]
pub fn crossed_all_won(before: &ProgressMap, after: &ProgressMap, catalog: &GameCatalog) -> bool {
    !before.all_won(catalog) && after.all_won(catalog)
}

/// Tracks whether the trigger already ran for the current session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionTrigger {
    fired: bool,
}

impl CompletionTrigger {
    /// A trigger for a session that was already complete when it was loaded.
    /// It never fires.
    #[must_use]
    pub const fn spent() -> Self {
        Self { fired: true }
    }

    #[must_use]
    pub const fn has_fired(self) -> bool {
        self.fired
    }

    /// Evaluate the edge and, when crossed, return the ordered side effects:
    /// the notice, then the delayed badge transition. Celebration mode itself is
    /// controller state and is entered by the caller when this returns `Some`.
    pub fn evaluate(
        &mut self,
        crossed: bool,
        session: &UserSession,
        reward_link: Option<&str>,
        timer: TimerId,
        delay: Duration,
    ) -> Option<Vec<Effect>> {
        if self.fired || !crossed {
            return None;
        }
        self.fired = true;
        log::info!(
            "passport complete for {}; scheduling badge in {} ms",
            session.identity,
            delay.as_millis()
        );
        Some(vec![
            Effect::SendNotice(CompletionNotice {
                identity: session.identity.clone(),
                display_name: session.display_name.clone(),
                reward_link: reward_link.map(str::to_owned),
            }),
            Effect::ScheduleBadge { timer, delay },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::GameId;
    use crate::identity::Email;
    use crate::session::UserId;
    use crate::status::Outcome;

    fn session(catalog: &GameCatalog) -> UserSession {
        UserSession {
            user_id: UserId("u-1".into()),
            identity: Email::parse("a@x.com").unwrap(),
            display_name: "Ada".into(),
            is_admin: false,
            passport_id: String::new(),
            progress: ProgressMap::fresh(catalog),
        }
    }

    fn won_all_but_last(catalog: &GameCatalog) -> (ProgressMap, GameId) {
        let ids: Vec<GameId> = catalog.ids().collect();
        let (last, rest) = ids.split_last().unwrap();
        let map = rest.iter().fold(ProgressMap::fresh(catalog), |map, id| {
            map.apply(*id, Outcome::Won).unwrap()
        });
        (map, *last)
    }

    #[test]
    fn edge_is_detected_only_on_transition() {
        let catalog = GameCatalog::load_from_static();
        let (before, last) = won_all_but_last(&catalog);
        let after = before.apply(last, Outcome::Won).unwrap();
        assert!(crossed_all_won(&before, &after, &catalog));
        assert!(!crossed_all_won(&after, &after, &catalog));
        assert!(!crossed_all_won(&before, &before, &catalog));
    }

    #[test]
    fn trigger_fires_once() {
        let catalog = GameCatalog::load_from_static();
        let session = session(&catalog);
        let mut trigger = CompletionTrigger::default();
        let delay = Duration::from_millis(2_500);

        let effects = trigger
            .evaluate(true, &session, Some("https://r"), TimerId(1), delay)
            .unwrap();
        assert_eq!(effects.len(), 2);
        match &effects[0] {
            Effect::SendNotice(notice) => {
                assert_eq!(notice.identity.as_str(), "a@x.com");
                assert_eq!(notice.reward_link.as_deref(), Some("https://r"));
            }
            other => panic!("unexpected first effect {other:?}"),
        }
        assert_eq!(
            effects[1],
            Effect::ScheduleBadge {
                timer: TimerId(1),
                delay
            }
        );
        assert!(trigger.has_fired());
        assert!(trigger
            .evaluate(true, &session, None, TimerId(2), delay)
            .is_none());
    }

    #[test]
    fn spent_trigger_never_fires() {
        let catalog = GameCatalog::load_from_static();
        let mut trigger = CompletionTrigger::spent();
        assert!(trigger
            .evaluate(true, &session(&catalog), None, TimerId(1), Duration::ZERO)
            .is_none());
    }
}
