//! Identity store and audit log over a PostgREST-style HTTP API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use voyager_core::{
    AdminSnapshot, AuditLog, AuditRecord, Email, GameId, GameMetadata, GameStatus, IdentityStore,
    Outcome, ProgressRow, StoreError, UserId, UserProgressRow, UserRecord, passport_code,
};

use crate::dom::{encode_component, fetch_text, js_error_message};

/// Account row as stored in the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub passport_id: Option<String>,
}

impl UserRow {
    /// # Errors
    ///
    /// Returns [`StoreError::Decode`] when the stored email is malformed.
    pub fn into_record(self) -> Result<UserRecord, StoreError> {
        let email = Email::parse(&self.email)
            .map_err(|err| StoreError::Decode(format!("user {}: {err}", self.id)))?;
        let passport_id = self
            .passport_id
            .filter(|code| !code.is_empty())
            .unwrap_or_else(|| passport_code(&email));
        Ok(UserRecord {
            id: UserId(self.id),
            email,
            name: self.name,
            is_admin: self.is_admin,
            passport_id,
        })
    }
}

#[derive(Debug, Serialize)]
struct NewUser<'a> {
    email: &'a str,
    name: &'a str,
    passport_id: String,
}

#[derive(Debug, Serialize)]
struct ProgressUpsert<'a> {
    user_id: &'a str,
    game_id: GameId,
    status: GameStatus,
    updated_at: DateTime<Utc>,
}

/// Row appended to `game_sessions` for every attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRow<'a> {
    pub user_id: &'a str,
    pub game_id: GameId,
    pub outcome: Outcome,
    pub metadata: &'a GameMetadata,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl<'a> From<&'a AuditRecord> for SessionRow<'a> {
    fn from(record: &'a AuditRecord) -> Self {
        Self {
            user_id: record.user_id.as_str(),
            game_id: record.game_id,
            outcome: record.outcome,
            metadata: &record.metadata,
            started_at: record.started_at,
            completed_at: record.completed_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestStore {
    base_url: String,
    api_key: String,
}

impl RestStore {
    #[must_use]
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    #[must_use]
    pub fn table_url(&self, table: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}/rest/v1/{table}", self.base_url)
        } else {
            format!("{}/rest/v1/{table}?{query}", self.base_url)
        }
    }

    #[must_use]
    pub fn user_lookup_url(&self, email: &Email) -> String {
        self.table_url(
            "users",
            &format!("select=*&email=eq.{}", encode_component(email.as_str())),
        )
    }

    /// Insert target that leaves an existing account with the same email untouched.
    #[must_use]
    pub fn user_upsert_url(&self) -> String {
        self.table_url("users", "on_conflict=email")
    }

    #[must_use]
    pub fn progress_url(&self, user_id: &UserId) -> String {
        self.table_url(
            "game_progress",
            &format!(
                "select=game_id,status&user_id=eq.{}",
                encode_component(user_id.as_str())
            ),
        )
    }

    async fn send(
        &self,
        method: &str,
        url: &str,
        prefer: Option<&str>,
        body: Option<String>,
    ) -> Result<String, StoreError> {
        let bearer = format!("Bearer {}", self.api_key);
        let mut headers = vec![
            ("apikey", self.api_key.as_str()),
            ("Authorization", bearer.as_str()),
            ("Content-Type", "application/json"),
        ];
        if let Some(prefer) = prefer {
            headers.push(("Prefer", prefer));
        }
        let reply = fetch_text(method, url, &headers, body.as_deref())
            .await
            .map_err(|err| StoreError::Transport(js_error_message(&err)))?;
        if reply.is_success() {
            Ok(reply.body)
        } else {
            Err(StoreError::Rejected {
                status: reply.status,
                message: reply.body,
            })
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, StoreError> {
        let body = self.send("GET", url, None, None).await?;
        decode(&body)
    }

    async fn post_json<B: Serialize>(
        &self,
        url: &str,
        prefer: &str,
        payload: &B,
    ) -> Result<String, StoreError> {
        let body =
            serde_json::to_string(payload).map_err(|err| StoreError::Decode(err.to_string()))?;
        self.send("POST", url, Some(prefer), Some(body)).await
    }
}

const USER_UPSERT_PREFER: &str = "resolution=ignore-duplicates,return=representation";

/// First account in a `users` response body.
///
/// # Errors
///
/// Returns [`StoreError::Decode`] for a malformed body or account.
pub fn first_user(body: &str) -> Result<Option<UserRecord>, StoreError> {
    let rows: Vec<UserRow> = decode(body)?;
    rows.into_iter().next().map(UserRow::into_record).transpose()
}

/// # Errors
///
/// Returns [`StoreError::Decode`] for a body that does not match `T`.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, StoreError> {
    serde_json::from_str(body).map_err(|err| StoreError::Decode(err.to_string()))
}

#[async_trait(?Send)]
impl IdentityStore for RestStore {
    async fn resolve_or_create_user(
        &self,
        email: &Email,
        name: &str,
    ) -> Result<UserRecord, StoreError> {
        let payload = NewUser {
            email: email.as_str(),
            name,
            passport_id: passport_code(email),
        };
        let body = self
            .post_json(&self.user_upsert_url(), USER_UPSERT_PREFER, &payload)
            .await?;
        if let Some(created) = first_user(&body)? {
            return Ok(created);
        }
        // Conflicting rows are skipped, so an existing account comes back empty.
        self.find_user(email)
            .await?
            .ok_or_else(|| StoreError::Decode(format!("no account stored for {email}")))
    }

    async fn find_user(&self, email: &Email) -> Result<Option<UserRecord>, StoreError> {
        let body = self.send("GET", &self.user_lookup_url(email), None, None).await?;
        first_user(&body)
    }

    async fn fetch_progress(&self, user_id: &UserId) -> Result<Vec<ProgressRow>, StoreError> {
        self.get_json(&self.progress_url(user_id)).await
    }

    async fn upsert_progress(
        &self,
        user_id: &UserId,
        game_id: GameId,
        status: GameStatus,
    ) -> Result<(), StoreError> {
        let payload = ProgressUpsert {
            user_id: user_id.as_str(),
            game_id,
            status,
            updated_at: Utc::now(),
        };
        self.post_json(
            &self.table_url("game_progress", "on_conflict=user_id,game_id"),
            "resolution=merge-duplicates",
            &payload,
        )
        .await
        .map(|_| ())
    }

    async fn fetch_all_users_and_progress(&self) -> Result<AdminSnapshot, StoreError> {
        let users: Vec<UserRow> = self
            .get_json(&self.table_url("users", "select=*"))
            .await?;
        let progress: Vec<UserProgressRow> = self
            .get_json(&self.table_url("game_progress", "select=user_id,game_id,status"))
            .await?;
        let users = users
            .into_iter()
            .filter_map(|row| match row.into_record() {
                Ok(record) => Some(record),
                Err(err) => {
                    log::warn!("skipping unreadable account: {err}");
                    None
                }
            })
            .collect();
        Ok(AdminSnapshot { users, progress })
    }
}

#[async_trait(?Send)]
impl AuditLog for RestStore {
    async fn append_session(&self, record: &AuditRecord) -> Result<(), StoreError> {
        self.post_json(
            &self.table_url("game_sessions", ""),
            "return=minimal",
            &SessionRow::from(record),
        )
        .await
        .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_urls_use_rest_prefix() {
        let store = RestStore::new("https://db.example.com/", "anon");
        assert_eq!(
            store.table_url("game_progress", "on_conflict=user_id,game_id"),
            "https://db.example.com/rest/v1/game_progress?on_conflict=user_id,game_id"
        );
        assert_eq!(
            store.table_url("game_sessions", ""),
            "https://db.example.com/rest/v1/game_sessions"
        );
    }

    #[test]
    fn user_upsert_targets_email_conflicts() {
        let store = RestStore::new("https://db.example.com", "anon");
        assert_eq!(
            store.user_upsert_url(),
            "https://db.example.com/rest/v1/users?on_conflict=email"
        );
        assert!(USER_UPSERT_PREFER.contains("resolution=ignore-duplicates"));
        assert!(USER_UPSERT_PREFER.contains("return=representation"));
    }

    #[test]
    fn skipped_upsert_yields_no_user() {
        assert_eq!(first_user("[]").unwrap(), None);
        let created = first_user(r#"[{"id":"9","email":"b@y.io","name":"Bo"}]"#)
            .unwrap()
            .unwrap();
        assert_eq!(created.id, UserId("9".into()));
        assert!(!created.is_admin);
    }

    #[test]
    fn user_rows_become_records() {
        let rows: Vec<UserRow> = decode(
            r#"[{"id":"7f1","email":"A@X.com","name":"Ada","is_admin":true,"passport_id":null}]"#,
        )
        .unwrap();
        let record = rows.into_iter().next().unwrap().into_record().unwrap();
        assert_eq!(record.id, UserId("7f1".into()));
        assert_eq!(record.email.as_str(), "a@x.com");
        assert!(record.is_admin);
        assert_eq!(record.passport_id, "144513");
    }

    #[test]
    fn progress_rows_decode_screaming_status() {
        let rows: Vec<ProgressRow> =
            decode(r#"[{"game_id":3,"status":"WON"},{"game_id":4,"status":"PARTICIPATED"}]"#)
                .unwrap();
        assert_eq!(rows[0].game_id, GameId(3));
        assert_eq!(rows[0].status, GameStatus::Won);
        assert_eq!(rows[1].status, GameStatus::Participated);
    }

    #[test]
    fn session_row_carries_tagged_metadata() {
        let record = AuditRecord {
            user_id: UserId("u".into()),
            game_id: GameId(2),
            outcome: Outcome::Won,
            metadata: GameMetadata::Quiz { answer: "5".into() },
            started_at: Utc::now(),
            completed_at: Utc::now(),
        };
        let value = serde_json::to_value(SessionRow::from(&record)).unwrap();
        assert_eq!(value["outcome"], "WON");
        assert!(value.get("result").is_none());
        assert_eq!(value["metadata"]["gameType"], "quiz");
        assert_eq!(value["user_id"], "u");
    }

    #[test]
    fn bad_bodies_are_decode_errors() {
        assert!(matches!(
            decode::<Vec<UserRow>>("<html>"),
            Err(StoreError::Decode(_))
        ));
    }
}
