//! Async flows that talk to the collaborators: bootstrap, login, admin load.

use thiserror::Error;

use crate::admin::AdminOverview;
use crate::catalog::GameCatalog;
use crate::identity::{Credentials, ValidationError, passport_code};
use crate::ports::{IdentityStore, SessionCache, StoreError};
use crate::progress::ProgressMap;
use crate::session::{UserRecord, UserSession};

/// How the app starts up.
#[derive(Debug, Clone, PartialEq)]
pub enum BootstrapOutcome {
    LoggedOut,
    /// Server-confirmed session. `all_won` lets the view go straight to the
    /// badge without replaying the completion trigger.
    Restored { session: UserSession, all_won: bool },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("could not reach the passport service: {0}")]
    Store(#[from] StoreError),
}

impl LoginError {
    /// Inline message for the login form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Invalid(err) => err.to_string(),
            Self::Store(_) => String::from("Something went wrong. Please try again."),
        }
    }
}

/// Restore the previous session from the device cache.
///
/// The cache is only a hint: the identity is re-checked against the store and
/// the progress map is always rebuilt from the server rows. Any failure clears
/// the cache and leaves the user logged out.
pub async fn bootstrap<S, C>(cache: &C, store: &S, catalog: &GameCatalog) -> BootstrapOutcome
where
    S: IdentityStore + ?Sized,
    C: SessionCache + ?Sized,
{
    let cached = match cache.read_last_session() {
        Ok(Some(cached)) => cached,
        Ok(None) => return BootstrapOutcome::LoggedOut,
        Err(err) => {
            log::warn!("discarding unreadable cached session: {err}");
            clear_cache(cache);
            return BootstrapOutcome::LoggedOut;
        }
    };

    let record = match store.find_user(&cached.identity).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            log::info!("cached identity {} no longer exists", cached.identity);
            clear_cache(cache);
            return BootstrapOutcome::LoggedOut;
        }
        Err(err) => {
            log::warn!("session refresh failed: {err}");
            clear_cache(cache);
            return BootstrapOutcome::LoggedOut;
        }
    };

    match load_session(store, catalog, record).await {
        Ok(session) => {
            write_cache(cache, &session);
            let all_won = session.all_won(catalog);
            BootstrapOutcome::Restored { session, all_won }
        }
        Err(err) => {
            log::warn!("progress refresh failed: {err}");
            clear_cache(cache);
            BootstrapOutcome::LoggedOut
        }
    }
}

/// Validate the form, then create-or-fetch the account and its progress.
///
/// # Errors
///
/// Returns [`LoginError::Invalid`] before any network call when the input is
/// malformed, and [`LoginError::Store`] when the store cannot be reached.
pub async fn login<S, C>(
    store: &S,
    cache: &C,
    catalog: &GameCatalog,
    email: &str,
    name: &str,
    name_max_len: usize,
) -> Result<UserSession, LoginError>
where
    S: IdentityStore + ?Sized,
    C: SessionCache + ?Sized,
{
    let credentials = Credentials::parse(email, name, name_max_len)?;
    let record = store
        .resolve_or_create_user(&credentials.email, &credentials.name)
        .await?;
    let session = load_session(store, catalog, record).await?;
    write_cache(cache, &session);
    log::info!(
        "signed in {} ({} of {} games won)",
        session.identity,
        session.progress.won_count(),
        catalog.len()
    );
    Ok(session)
}

/// Fetch every user and row and fold them into the admin summary.
///
/// # Errors
///
/// Propagates the store failure.
pub async fn load_admin_overview<S>(
    store: &S,
    catalog: &GameCatalog,
) -> Result<AdminOverview, StoreError>
where
    S: IdentityStore + ?Sized,
{
    let snapshot = store.fetch_all_users_and_progress().await?;
    Ok(AdminOverview::from_snapshot(catalog, &snapshot))
}

async fn load_session<S>(
    store: &S,
    catalog: &GameCatalog,
    mut record: UserRecord,
) -> Result<UserSession, StoreError>
where
    S: IdentityStore + ?Sized,
{
    let rows = store.fetch_progress(&record.id).await?;
    let progress = ProgressMap::from_rows(catalog, &rows);
    if record.passport_id.is_empty() {
        record.passport_id = passport_code(&record.email);
    }
    Ok(UserSession::from_record(record, progress))
}

fn write_cache<C: SessionCache + ?Sized>(cache: &C, session: &UserSession) {
    if let Err(err) = cache.write_last_session(&session.to_cached()) {
        log::warn!("could not cache session: {err}");
    }
}

fn clear_cache<C: SessionCache + ?Sized>(cache: &C) {
    if let Err(err) = cache.clear_last_session() {
        log::warn!("could not clear cached session: {err}");
    }
}
