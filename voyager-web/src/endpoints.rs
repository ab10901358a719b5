//! Backend endpoints baked in at compile time.
///
/// `VOYAGER_STORE_URL` / `VOYAGER_STORE_KEY` point at the hosted database's
/// REST API and `VOYAGER_NOTIFIER_URL` at the mailer service. Builds without a
/// store URL run against an in-memory store so the app can be demoed offline.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Endpoints {
    pub store: Option<StoreEndpoint>,
    pub notifier_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEndpoint {
    pub url: String,
    pub key: String,
}

impl Endpoints {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("VOYAGER_STORE_URL"),
            option_env!("VOYAGER_STORE_KEY"),
            option_env!("VOYAGER_NOTIFIER_URL"),
        )
    }

    fn from_values(
        store_url: Option<&str>,
        store_key: Option<&str>,
        notifier_url: Option<&str>,
    ) -> Self {
        let store = non_blank(store_url).map(|url| StoreEndpoint {
            url: url.trim_end_matches('/').to_string(),
            key: store_key.unwrap_or_default().trim().to_string(),
        });
        Self {
            store,
            notifier_url: non_blank(notifier_url).map(|url| url.trim_end_matches('/').to_string()),
        }
    }

    #[must_use]
    pub const fn is_offline(&self) -> bool {
        self.store.is_none()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
