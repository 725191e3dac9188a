//! Keychain lookup.

use serde_json::{Map, Value, json};

use crate::error::BitgoError;
use crate::execution::http::ApiHandle;
use crate::params::{ParameterSpec, Parameters, ensure_required, expect_string, mass_assign};

/// Fetch keychains for this coin: all of them, or a single one by id.
///
/// `GET /key`, or `GET /key/{id}` when an id is set.
pub struct Keychains {
    api: ApiHandle,
    id: Option<String>,
}

const SPEC: ParameterSpec = ParameterSpec {
    required: &[],
    optional: &["id"],
    swaps: &[],
};

impl Keychains {
    pub(crate) fn new(api: ApiHandle) -> Self {
        Self { api, id: None }
    }

    /// Narrow the lookup to one keychain.
    pub fn key_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_params(mut self, entries: &Map<String, Value>) -> Result<Self, BitgoError> {
        mass_assign(&mut self, entries)?;
        Ok(self)
    }

    pub async fn send(self) -> Result<Value, BitgoError> {
        ensure_required(&self)?;
        if self.id.is_some() {
            self.api.get("/key/{id}", &self).await
        } else {
            self.api.get("/key", &self).await
        }
    }
}

impl Parameters for Keychains {
    fn spec(&self) -> &'static ParameterSpec {
        &SPEC
    }

    fn get(&self, name: &str) -> Result<Value, BitgoError> {
        match name {
            "id" => Ok(json!(self.id)),
            _ => Err(BitgoError::unknown_parameter("Keychains", name)),
        }
    }

    fn assign(&mut self, name: &str, value: &Value) -> Result<bool, BitgoError> {
        match name {
            "id" => self.id = Some(expect_string(name, value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::coin::CoinType;
    use crate::config::Config;
    use crate::execution::{ApiRequest, Transport};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct RecordingTransport {
        urls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn execute(&self, request: ApiRequest) -> Result<Value, BitgoError> {
            self.urls.lock().unwrap().push(request.url);
            Ok(Value::Null)
        }
    }

    #[tokio::test]
    async fn id_switches_between_list_and_single_lookup() {
        let transport = Arc::new(RecordingTransport {
            urls: Mutex::new(Vec::new()),
        });
        let api = ApiHandle::new(
            Config::new("token"),
            Some(CoinType::Tbtc),
            transport.clone(),
        );

        Keychains::new(api.clone()).send().await.unwrap();
        Keychains::new(api).key_id("key-1").send().await.unwrap();

        let urls = transport.urls.lock().unwrap();
        assert!(urls[0].ends_with("/api/v2/tbtc/key"));
        assert!(urls[1].ends_with("/api/v2/tbtc/key/key-1"));
    }
}
