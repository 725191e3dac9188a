//! HTTP dispatch for request builders.
//!
//! Builders never talk to `reqwest` directly. They hand an [`ApiHandle`]
//! a method, a path template, and their [`Parameters`] surface; the
//! handle expands `{placeholder}` segments, projects the payload, and
//! forwards a fully-formed [`ApiRequest`] to the configured
//! [`Transport`]. The default transport rides on `reqwest`; embedders
//! and tests can inject a synthetic one.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::{Map, Value};

use crate::coin::CoinType;
use crate::config::Config;
use crate::error::BitgoError;
use crate::params::{Parameters, project};

const API_PREFIX: &str = "/api/v2";

/// A fully-resolved request, ready for a transport to dispatch.
///
/// `GET` payloads are encoded as query parameters; `POST`/`DELETE`
/// payloads become the JSON body.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub payload: Map<String, Value>,
}

/// Pluggable dispatch seam.
///
/// Transport and HTTP errors are surfaced to the caller unchanged;
/// nothing at this layer retries, times out, or intercepts.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<Value, BitgoError>;
}

/// Default transport over a shared `reqwest` client.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, BitgoError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("bitgo-rs/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client (connection pools, proxies, custom TLS).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, BitgoError> {
        let ApiRequest {
            method,
            url,
            headers,
            payload,
        } = request;

        tracing::debug!(%method, %url, parameters = payload.len(), "dispatching BitGo request");

        let mut builder = self.client.request(method.clone(), url.as_str()).headers(headers);
        if method == Method::GET {
            if !payload.is_empty() {
                builder = builder.query(&query_pairs(&payload));
            }
        } else {
            builder = builder.json(&Value::Object(payload));
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            if text.is_empty() {
                Ok(Value::Null)
            } else {
                Ok(serde_json::from_str(&text)?)
            }
        } else {
            // Rejections are not always JSON (proxies, load balancers);
            // keep whatever the server said.
            let body = if text.is_empty() {
                Value::Null
            } else {
                serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text.clone()))
            };
            let message = error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").into());
            tracing::debug!(status = status.as_u16(), %message, "BitGo request rejected");
            Err(BitgoError::api_error(status.as_u16(), message, Some(body)))
        }
    }
}

/// BitGo error bodies carry `error` and sometimes `message`.
fn error_message(body: &Value) -> Option<String> {
    for key in ["error", "message"] {
        if let Some(message) = body.get(key).and_then(Value::as_str) {
            return Some(message.to_string());
        }
    }
    None
}

fn query_pairs(payload: &Map<String, Value>) -> Vec<(String, String)> {
    payload
        .iter()
        .map(|(key, value)| (key.clone(), query_value(value)))
        .collect()
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Substitute `{name}` segments in a path template from the builder's
/// current field values.
///
/// Templates only reference parameters the builder requires, so a
/// missing value here is a declaration defect, not user error.
pub(crate) fn expand_path<P: Parameters + ?Sized>(
    template: &str,
    params: &P,
) -> Result<String, BitgoError> {
    let mut expanded = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        expanded.push_str(&rest[..open]);
        let close = rest[open..].find('}').map(|i| open + i).ok_or_else(|| {
            BitgoError::Configuration(format!("unterminated placeholder in path '{template}'"))
        })?;
        let name = &rest[open + 1..close];

        match params.get(name)? {
            Value::String(s) if !s.is_empty() => expanded.push_str(&s),
            Value::Number(n) => expanded.push_str(&n.to_string()),
            _ => {
                return Err(BitgoError::Configuration(format!(
                    "path placeholder '{name}' has no value"
                )));
            }
        }

        rest = &rest[close + 1..];
    }

    expanded.push_str(rest);
    Ok(expanded)
}

/// Shared dispatch context for every request builder: configuration,
/// optional coin scope, and the transport seam.
#[derive(Clone)]
pub(crate) struct ApiHandle {
    config: Config,
    coin: Option<CoinType>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ApiHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiHandle")
            .field("config", &self.config)
            .field("coin", &self.coin)
            .field("transport", &"<dyn Transport>")
            .finish()
    }
}

impl ApiHandle {
    pub fn new(config: Config, coin: Option<CoinType>, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            coin,
            transport,
        }
    }

    /// The same handle without a coin scope, for endpoints that live
    /// outside `/api/v2/{coin}`.
    pub fn unscoped(&self) -> Self {
        Self {
            config: self.config.clone(),
            coin: None,
            transport: Arc::clone(&self.transport),
        }
    }

    pub async fn get<P: Parameters + ?Sized>(
        &self,
        template: &str,
        params: &P,
    ) -> Result<Value, BitgoError> {
        self.call(Method::GET, template, params).await
    }

    pub async fn post<P: Parameters + ?Sized>(
        &self,
        template: &str,
        params: &P,
    ) -> Result<Value, BitgoError> {
        self.call(Method::POST, template, params).await
    }

    pub async fn delete<P: Parameters + ?Sized>(
        &self,
        template: &str,
        params: &P,
    ) -> Result<Value, BitgoError> {
        self.call(Method::DELETE, template, params).await
    }

    async fn call<P: Parameters + ?Sized>(
        &self,
        method: Method,
        template: &str,
        params: &P,
    ) -> Result<Value, BitgoError> {
        let path = expand_path(template, params)?;
        let payload = project(params)?;
        let request = ApiRequest {
            method,
            url: self.endpoint(&path),
            headers: self.headers()?,
            payload,
        };
        self.transport.execute(request).await
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.config.base_url();
        match self.coin {
            Some(coin) => format!("{base}{API_PREFIX}/{coin}{path}"),
            None => format!("{base}{API_PREFIX}{path}"),
        }
    }

    fn headers(&self) -> Result<HeaderMap, BitgoError> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {}", self.config.expose_token());
        let mut auth = HeaderValue::from_str(&bearer)
            .map_err(|e| BitgoError::Configuration(format!("invalid access token: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParameterSpec;
    use serde_json::json;

    struct PathParams {
        wallet_id: Option<String>,
    }

    const SPEC: ParameterSpec = ParameterSpec {
        required: &["walletId"],
        optional: &[],
        swaps: &[],
    };

    impl Parameters for PathParams {
        fn spec(&self) -> &'static ParameterSpec {
            &SPEC
        }

        fn get(&self, name: &str) -> Result<Value, BitgoError> {
            match name {
                "walletId" => Ok(json!(self.wallet_id)),
                _ => Err(BitgoError::unknown_parameter("PathParams", name)),
            }
        }

        fn assign(&mut self, _name: &str, _value: &Value) -> Result<bool, BitgoError> {
            Ok(false)
        }
    }

    #[test]
    fn expands_placeholders_from_field_values() {
        let params = PathParams {
            wallet_id: Some("58ae".into()),
        };
        let path = expand_path("/wallet/{walletId}/tx/build", &params).unwrap();
        assert_eq!(path, "/wallet/58ae/tx/build");
    }

    #[test]
    fn missing_placeholder_value_is_a_fault() {
        let params = PathParams { wallet_id: None };
        let err = expand_path("/wallet/{walletId}", &params).unwrap_err();
        assert!(matches!(err, BitgoError::Configuration(_)));
    }

    #[test]
    fn undeclared_placeholder_name_is_a_fault() {
        let params = PathParams {
            wallet_id: Some("58ae".into()),
        };
        let err = expand_path("/wallet/{ghost}", &params).unwrap_err();
        assert!(matches!(err, BitgoError::Configuration(_)));
    }

    #[test]
    fn unterminated_placeholder_is_a_fault() {
        let params = PathParams {
            wallet_id: Some("58ae".into()),
        };
        assert!(expand_path("/wallet/{walletId", &params).is_err());
    }

    #[test]
    fn templates_without_placeholders_pass_through() {
        let params = PathParams { wallet_id: None };
        assert_eq!(
            expand_path("/market/latest", &params).unwrap(),
            "/market/latest"
        );
    }

    #[test]
    fn query_values_render_scalars_bare() {
        assert_eq!(query_value(&json!("abc")), "abc");
        assert_eq!(query_value(&json!(10)), "10");
        assert_eq!(query_value(&json!(true)), "true");
    }
}
