//! Aggregate statistics for the admin screen.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::catalog::{GameCatalog, GameId};
use crate::ports::AdminSnapshot;
use crate::session::UserId;

#[derive(Debug, Clone, Default)]
struct Tally {
    attempts: usize,
    wins: usize,
    won: BTreeSet<GameId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserRow {
    pub name: String,
    pub email: String,
    pub attempts: usize,
    pub wins: usize,
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub total_users: usize,
    pub total_attempts: usize,
    pub total_wins: usize,
    pub fully_completed: usize,
    pub users: Vec<AdminUserRow>,
}

impl AdminOverview {
    /// Fold every account and progress row into the admin summary.
    ///
    /// A user counts as fully completed when they have at least one row, all
    /// their rows are `WON`, and they have won every catalog game.
    #[must_use]
    pub fn from_snapshot(catalog: &GameCatalog, snapshot: &AdminSnapshot) -> Self {
        let mut per_user: BTreeMap<&UserId, Tally> = BTreeMap::new();
        for row in &snapshot.progress {
            let tally = per_user.entry(&row.user_id).or_default();
            tally.attempts += 1;
            if row.status.is_won() {
                tally.wins += 1;
                tally.won.insert(row.game_id);
            }
        }

        let mut users: Vec<AdminUserRow> = snapshot
            .users
            .iter()
            .map(|user| {
                let tally = per_user.get(&user.id).cloned().unwrap_or_default();
                let completed = tally.attempts > 0
                    && tally.wins == tally.attempts
                    && catalog.ids().all(|id| tally.won.contains(&id));
                AdminUserRow {
                    name: user.name.clone(),
                    email: user.email.to_string(),
                    attempts: tally.attempts,
                    wins: tally.wins,
                    completed,
                }
            })
            .collect();
        users.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.email.cmp(&b.email))
        });

        Self {
            total_users: snapshot.users.len(),
            total_attempts: snapshot.progress.len(),
            total_wins: snapshot
                .progress
                .iter()
                .filter(|row| row.status.is_won())
                .count(),
            fully_completed: users.iter().filter(|row| row.completed).count(),
            users,
        }
    }

    /// Share of users who completed the passport, in whole percent.
    #[must_use]
    pub fn completion_percent(&self) -> u8 {
        if self.total_users == 0 {
            return 0;
        }
        let pct = self.fully_completed * 100 / self.total_users;
        u8::try_from(pct).unwrap_or(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Email;
    use crate::ports::UserProgressRow;
    use crate::session::UserRecord;
    use crate::status::GameStatus;

    fn user(id: &str, email: &str, name: &str) -> UserRecord {
        UserRecord {
            id: UserId(id.into()),
            email: Email::parse(email).unwrap(),
            name: name.into(),
            is_admin: false,
            passport_id: String::new(),
        }
    }

    fn row(user: &str, game: u16, status: GameStatus) -> UserProgressRow {
        UserProgressRow {
            user_id: UserId(user.into()),
            game_id: GameId(game),
            status,
        }
    }

    #[test]
    fn aggregates_attempts_wins_and_completion() {
        let catalog = GameCatalog::load_from_static();
        let mut progress: Vec<UserProgressRow> = catalog
            .ids()
            .map(|id| row("u-1", id.get(), GameStatus::Won))
            .collect();
        progress.push(row("u-2", 1, GameStatus::Won));
        progress.push(row("u-2", 2, GameStatus::Participated));
        let snapshot = AdminSnapshot {
            users: vec![
                user("u-2", "zed@x.com", "Zed"),
                user("u-1", "ada@x.com", "Ada"),
                user("u-3", "bob@x.com", "bob"),
            ],
            progress,
        };

        let overview = AdminOverview::from_snapshot(&catalog, &snapshot);
        assert_eq!(overview.total_users, 3);
        assert_eq!(overview.total_attempts, catalog.len() + 2);
        assert_eq!(overview.total_wins, catalog.len() + 1);
        assert_eq!(overview.fully_completed, 1);
        assert_eq!(overview.completion_percent(), 33);

        let names: Vec<&str> = overview.users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Ada", "bob", "Zed"]);
        assert_eq!(overview.users[1].attempts, 0);
        assert!(overview.users[0].completed);
        assert!(!overview.users[2].completed);
    }

    #[test]
    fn partial_all_won_rows_do_not_count_as_completed() {
        let catalog = GameCatalog::load_from_static();
        let snapshot = AdminSnapshot {
            users: vec![user("u-1", "ada@x.com", "Ada")],
            progress: vec![row("u-1", 1, GameStatus::Won)],
        };
        let overview = AdminOverview::from_snapshot(&catalog, &snapshot);
        assert_eq!(overview.fully_completed, 0);
        assert_eq!(overview.users[0].wins, 1);
    }

    #[test]
    fn empty_snapshot_is_all_zero() {
        let overview =
            AdminOverview::from_snapshot(&GameCatalog::load_from_static(), &AdminSnapshot::default());
        assert_eq!(overview, AdminOverview::default());
        assert_eq!(overview.completion_percent(), 0);
    }
}
