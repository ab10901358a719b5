use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use voyager_mailer::{Args, DryRunMailer, Mailer, SmtpMailer, app};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mailer: Arc<dyn Mailer> = match args.smtp_settings()? {
        Some(settings) => {
            log::info!("relaying through {}:{}", settings.host, settings.port);
            Arc::new(SmtpMailer::new(&settings).context("configuring SMTP transport")?)
        }
        None => {
            log::warn!("dry run: emails will be logged, not sent");
            Arc::new(DryRunMailer)
        }
    };

    let addr = args.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    log::info!("voyager-mailer listening on {addr}");
    axum::serve(listener, app(mailer))
        .await
        .context("server error")?;
    Ok(())
}
