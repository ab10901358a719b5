//! Winner-badge notification service for the Voyager passport.
//!
//! A small axum app: the browser posts a completion notice, the service
//! renders the congratulatory email and hands it to a [`Mailer`].

pub mod cli;
pub mod email;
pub mod mailer;
pub mod routes;

pub use cli::{Args, SettingsError, SmtpSettings};
pub use email::{BadgeEmail, WinnerBadgeRequest, render_badge_email};
pub use mailer::{DryRunMailer, MailError, Mailer, SmtpMailer};
pub use routes::{AppState, app};
