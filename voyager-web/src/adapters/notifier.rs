use async_trait::async_trait;
use serde::Serialize;
use voyager_core::{CompletionNotice, Notifier, NotifyError};

use crate::dom::{fetch_text, js_error_message};

/// Request body understood by the mailer service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerBadgeRequest<'a> {
    pub email: &'a str,
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward_link: Option<&'a str>,
}

impl<'a> From<&'a CompletionNotice> for WinnerBadgeRequest<'a> {
    fn from(notice: &'a CompletionNotice) -> Self {
        Self {
            email: notice.identity.as_str(),
            name: &notice.display_name,
            reward_link: notice.reward_link.as_deref(),
        }
    }
}

/// Posts completion notices to the mailer's winner-badge endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpNotifier {
    endpoint: String,
}

impl HttpNotifier {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: format!("{}/api/send-winner-badge", base_url.trim_end_matches('/')),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait(?Send)]
impl Notifier for HttpNotifier {
    async fn send_completion_notice(&self, notice: &CompletionNotice) -> Result<(), NotifyError> {
        let body = serde_json::to_string(&WinnerBadgeRequest::from(notice))
            .map_err(|err| NotifyError::Transport(err.to_string()))?;
        let reply = fetch_text(
            "POST",
            &self.endpoint,
            &[("Content-Type", "application/json")],
            Some(&body),
        )
        .await
        .map_err(|err| NotifyError::Transport(js_error_message(&err)))?;
        if reply.is_success() {
            Ok(())
        } else {
            Err(NotifyError::Status(reply.status))
        }
    }
}
