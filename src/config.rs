//! Client configuration: access token, target host, and TLS posture.
//!
//! The configuration is opaque to the validation engine; it is consumed
//! by the transport when requests are dispatched. The access token is
//! held as a [`SecretString`] so it never appears in debug output or
//! tracing logs.

use secrecy::{ExposeSecret, SecretString};

const DEFAULT_HOST: &str = "www.bitgo.com";

/// Connection settings for a BitGo endpoint.
///
/// ```
/// use bitgo::Config;
///
/// let config = Config::new("v2x...token").host("test.bitgo.com");
/// assert_eq!(config.base_url(), "https://test.bitgo.com");
/// ```
#[derive(Clone, Debug)]
pub struct Config {
    access_token: SecretString,
    host: String,
    port: Option<u16>,
    secure: bool,
}

impl Config {
    /// Create a configuration for the production host with TLS enabled.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: SecretString::from(access_token.into()),
            host: DEFAULT_HOST.to_string(),
            port: None,
            secure: true,
        }
    }

    /// Target a different BitGo host (e.g. `test.bitgo.com` or a local
    /// BitGo Express instance).
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Use a non-default port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Toggle TLS. Plain HTTP is only sensible against a local Express
    /// instance or a test double.
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Scheme, host, and optional port, without a trailing slash.
    pub fn base_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        match self.port {
            Some(port) => format!("{scheme}://{}:{port}", self.host),
            None => format!("{scheme}://{}", self.host),
        }
    }

    pub(crate) fn expose_token(&self) -> &str {
        self.access_token.expose_secret()
    }
}
