use std::net::{Ipv4Addr, SocketAddr};

use clap::Parser;
use thiserror::Error;

#[derive(Debug, Clone, Parser)]
#[command(name = "voyager-mailer")]
#[command(about = "Sends winner badges to voyagers who complete every mission")]
#[command(version)]
pub struct Args {
    /// Address to listen on; takes precedence over --port
    #[arg(long, env = "VOYAGER_MAILER_BIND")]
    pub bind: Option<SocketAddr>,

    /// Port to listen on across all interfaces
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// SMTP relay host
    #[arg(long, env = "SMTP_HOST")]
    pub smtp_host: Option<String>,

    /// SMTP port (implicit TLS)
    #[arg(long, env = "SMTP_PORT", default_value_t = 465)]
    pub smtp_port: u16,

    /// SMTP account, also used as the sender address
    #[arg(long, env = "SMTP_USER")]
    pub smtp_user: Option<String>,

    #[arg(long, env = "SMTP_PASS", hide_env_values = true)]
    pub smtp_pass: Option<String>,

    /// Display name on the From header
    #[arg(long, default_value = "SAP Voyager")]
    pub from_name: String,

    /// Log emails instead of sending them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub from_name: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("--{0} is required unless --dry-run is set")]
    Missing(&'static str),
}

impl Args {
    const DEFAULT_PORT: u16 = 4000;

    #[must_use]
    pub fn listen_addr(&self) -> SocketAddr {
        self.bind.unwrap_or_else(|| {
            SocketAddr::from((
                Ipv4Addr::UNSPECIFIED,
                self.port.unwrap_or(Self::DEFAULT_PORT),
            ))
        })
    }

    /// `None` when running dry.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] for the first absent credential.
    pub fn smtp_settings(&self) -> Result<Option<SmtpSettings>, SettingsError> {
        if self.dry_run {
            return Ok(None);
        }
        let require = |value: &Option<String>, flag: &'static str| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or(SettingsError::Missing(flag))
        };
        Ok(Some(SmtpSettings {
            host: require(&self.smtp_host, "smtp-host")?,
            port: self.smtp_port,
            user: require(&self.smtp_user, "smtp-user")?,
            password: require(&self.smtp_pass, "smtp-pass")?,
            from_name: self.from_name.clone(),
        }))
    }
}
