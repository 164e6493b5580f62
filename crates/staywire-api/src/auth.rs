// OAuth2 client-credentials token lifecycle.
//
// The upstream issues short-lived bearer tokens in exchange for a
// client id/secret pair. `TokenManager` caches the current token and
// re-exchanges before it runs out, so callers never see a stale one.

use std::str::FromStr;
use std::time::{Duration, Instant};

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;
use url::Url;

use crate::error::Error;

/// A cached token is reused only while it has at least this much
/// validity left. Below the margin a fresh exchange happens before
/// the dependent call proceeds.
pub const TOKEN_SAFETY_MARGIN: Duration = Duration::from_secs(30);

/// Which upstream environment to talk to.
///
/// Determines the API host and whether the office identifier is sent
/// with the credential exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Sandbox host -- free test data, office id accepted.
    Test,
    /// Enterprise production host.
    Production,
}

impl Environment {
    /// The base URL for all API calls on this environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Test => "https://test.api.amadeus.com",
            Self::Production => "https://api.amadeus.com",
        }
    }

    /// The token endpoint path (same on both environments).
    #[allow(clippy::unused_self)]
    pub fn token_path(&self) -> &'static str {
        "/v1/security/oauth2/token"
    }

    /// Whether the credential exchange should carry the office id.
    ///
    /// Production tenancy is bound to the client id itself; only the
    /// sandbox accepts an explicit office identifier.
    pub fn sends_office_id(&self) -> bool {
        matches!(self, Self::Test)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "test" | "sandbox" => Ok(Self::Test),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("expected 'test' or 'production', got '{other}'")),
        }
    }
}

/// Client id/secret pair plus optional office identifier.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: SecretString,
    /// Tenant/office identifier, only sent on the test environment.
    pub office_id: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct CachedToken {
    token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self, now: Instant) -> bool {
        now + TOKEN_SAFETY_MARGIN < self.expires_at
    }
}

/// Caches the bearer token from the client-credentials exchange.
///
/// The cache sits behind a `tokio::sync::Mutex`, which also gives
/// single-flight refresh: concurrent callers during a cache miss wait
/// for one exchange instead of racing. A redundant extra exchange
/// would be harmless either way -- the flow is idempotent.
pub struct TokenManager {
    http: reqwest::Client,
    token_url: Url,
    environment: Environment,
    credentials: ClientCredentials,
    cache: Mutex<Option<CachedToken>>,
}

impl TokenManager {
    /// Create a manager for the given environment and credentials.
    ///
    /// `base_url` is the API root; the token path is joined onto it.
    pub fn new(
        http: reqwest::Client,
        base_url: &Url,
        environment: Environment,
        credentials: ClientCredentials,
    ) -> Result<Self, Error> {
        let token_url = base_url.join(environment.token_path())?;
        Ok(Self {
            http,
            token_url,
            environment,
            credentials,
            cache: Mutex::new(None),
        })
    }

    /// Return a bearer token with at least [`TOKEN_SAFETY_MARGIN`] of
    /// validity remaining, exchanging credentials if needed.
    ///
    /// No automatic retry: if the exchange fails the caller's
    /// operation fails, and the next invocation attempts a fresh one.
    pub async fn bearer_token(&self) -> Result<String, Error> {
        let mut cache = self.cache.lock().await;

        if let Some(cached) = cache.as_ref() {
            if cached.is_fresh(Instant::now()) {
                return Ok(cached.token.clone());
            }
        }

        let fresh = self.exchange().await?;
        let token = fresh.token.clone();
        *cache = Some(fresh);
        Ok(token)
    }

    /// Perform the client-credentials exchange.
    async fn exchange(&self) -> Result<CachedToken, Error> {
        debug!("exchanging client credentials at {}", self.token_url);

        let mut form: Vec<(&str, &str)> = vec![
            ("grant_type", "client_credentials"),
            ("client_id", &self.credentials.client_id),
            ("client_secret", self.credentials.client_secret.expose_secret()),
        ];
        if self.environment.sends_office_id() {
            if let Some(ref office) = self.credentials.office_id {
                form.push(("officeId", office));
            }
        }

        let resp = self
            .http
            .post(self.token_url.clone())
            .form(&form)
            .send()
            .await
            .map_err(|e| Error::Authentication {
                message: format!("credential exchange unreachable: {e}"),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("credential exchange rejected (HTTP {status}): {body}"),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        let parsed: TokenResponse =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            })?;

        debug!(expires_in = parsed.expires_in, "token exchange successful");

        Ok(CachedToken {
            token: parsed.access_token,
            expires_at: Instant::now() + Duration::from_secs(parsed.expires_in),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_with_wide_margin_is_fresh() {
        let now = Instant::now();
        let cached = CachedToken {
            token: "tok".into(),
            expires_at: now + Duration::from_secs(40),
        };
        assert!(cached.is_fresh(now));
    }

    #[test]
    fn token_inside_safety_margin_is_stale() {
        let now = Instant::now();
        let cached = CachedToken {
            token: "tok".into(),
            expires_at: now + Duration::from_secs(20),
        };
        assert!(!cached.is_fresh(now));
    }

    #[test]
    fn environment_parsing() {
        assert_eq!("test".parse::<Environment>().ok(), Some(Environment::Test));
        assert_eq!(
            "PROD".parse::<Environment>().ok(),
            Some(Environment::Production)
        );
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn office_id_only_on_test() {
        assert!(Environment::Test.sends_office_id());
        assert!(!Environment::Production.sends_office_id());
    }
}
