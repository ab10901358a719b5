use serde::Deserialize;

pub const SUBJECT: &str = "Congratulations — You completed all games!";

/// Body of `POST /api/send-winner-badge`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerBadgeRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub reward_link: Option<String>,
}

impl WinnerBadgeRequest {
    /// Trimmed recipient, if one was given.
    #[must_use]
    pub fn recipient(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }
}

/// A rendered message ready for a [`crate::Mailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[must_use]
pub fn render_badge_email(to: &str, request: &WinnerBadgeRequest) -> BadgeEmail {
    let greeting = request
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map_or_else(|| "voyager".to_string(), escape_html);
    let mut html = format!(
        "<h2>Congratulations, {greeting}!</h2>\n\
         <p>You have successfully completed all games in the SAP Voyager Passport.</p>\n\
         <p>Here is your winning badge 🎖</p>\n"
    );
    if let Some(link) = request
        .reward_link
        .as_deref()
        .filter(|link| link.starts_with("https://") || link.starts_with("http://"))
    {
        let link = escape_html(link);
        html.push_str(&format!(
            "<p>Your certification voucher is waiting: <a href=\"{link}\">{link}</a></p>\n"
        ));
    }
    BadgeEmail {
        to: to.to_string(),
        subject: SUBJECT.to_string(),
        html,
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_email_has_no_recipient() {
        let request = WinnerBadgeRequest {
            email: Some("   ".into()),
            ..WinnerBadgeRequest::default()
        };
        assert_eq!(request.recipient(), None);
    }

    #[test]
    fn names_are_escaped_into_the_greeting() {
        let request = WinnerBadgeRequest {
            name: Some("Ada <script>".into()),
            ..WinnerBadgeRequest::default()
        };
        let email = render_badge_email("a@x.com", &request);
        assert!(email.html.contains("Congratulations, Ada &lt;script&gt;!"));
        assert_eq!(email.subject, SUBJECT);
    }

    #[test]
    fn reward_link_is_included_when_it_is_a_web_url() {
        let request = WinnerBadgeRequest {
            reward_link: Some("https://learning.sap.com/certifications/c-s4fi".into()),
            ..WinnerBadgeRequest::default()
        };
        let email = render_badge_email("a@x.com", &request);
        assert!(email.html.contains("href=\"https://learning.sap.com/certifications/c-s4fi\""));

        let request = WinnerBadgeRequest {
            reward_link: Some("javascript:alert(1)".into()),
            ..WinnerBadgeRequest::default()
        };
        assert!(!render_badge_email("a@x.com", &request).html.contains("href"));
    }

    #[test]
    fn anonymous_winners_are_greeted_as_voyagers() {
        let email = render_badge_email("a@x.com", &WinnerBadgeRequest::default());
        assert!(email.html.contains("Congratulations, voyager!"));
    }
}
