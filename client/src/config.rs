use compact_str::CompactString;
use std::{fmt, time::Duration};
use tg_api::Error;

pub const DEFAULT_API_HOST: &str = "https://api.telegram.org";

pub const TOKEN_VAR: &str = "TOKEN";
pub const API_HOST_VAR: &str = "TG_API_HOST";
pub const TIMEOUT_VAR: &str = "TG_API_TIMEOUT_SECS";

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub token: CompactString,
    pub api_host: CompactString,
    pub timeout: Option<Duration>,
}

// token never leaves through logs
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"<redacted>")
            .field("api_host", &self.api_host)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(token: impl Into<CompactString>) -> Self {
        Self {
            token: token.into(),
            api_host: DEFAULT_API_HOST.into(),
            timeout: None,
        }
    }

    pub fn with_api_host(mut self, api_host: impl Into<CompactString>) -> Self {
        self.api_host = api_host.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Reads `TOKEN`, `TG_API_HOST` and `TG_API_TIMEOUT_SECS`, `.env` included.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let token = lookup(TOKEN_VAR)
            .ok_or_else(|| Error::configuration(format!("{TOKEN_VAR} is not set")))?;
        let mut config = Self::new(token);

        if let Some(api_host) = lookup(API_HOST_VAR) {
            config.api_host = api_host.into();
        }
        if let Some(timeout) = lookup(TIMEOUT_VAR) {
            let secs = timeout.trim().parse::<u64>().map_err(|err| {
                Error::configuration(format!("{TIMEOUT_VAR} = {timeout:?}: {err}"))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.token.is_empty() {
            return Err(Error::configuration("bot token is empty"));
        }
        if self.token.chars().any(char::is_whitespace) {
            return Err(Error::configuration("bot token contains whitespace"));
        }
        if self.api_host.trim_end_matches('/').is_empty() {
            return Err(Error::configuration("api host is empty"));
        }
        Ok(())
    }

    pub fn method_url(&self, path: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_host.trim_end_matches('/'),
            self.token,
            path
        )
    }
}
