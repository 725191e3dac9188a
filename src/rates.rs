//! Market data.

use serde_json::Value;

use crate::error::BitgoError;
use crate::execution::http::ApiHandle;
use crate::params::{ParameterSpec, Parameters};

/// Latest market data for the client's coin. Takes no parameters.
///
/// `GET /market/latest`
pub struct Rates {
    api: ApiHandle,
}

impl Rates {
    pub(crate) fn new(api: ApiHandle) -> Self {
        Self { api }
    }

    pub async fn send(self) -> Result<Value, BitgoError> {
        self.api.get("/market/latest", &self).await
    }
}

impl Parameters for Rates {
    fn spec(&self) -> &'static ParameterSpec {
        &ParameterSpec::EMPTY
    }

    fn get(&self, name: &str) -> Result<Value, BitgoError> {
        Err(BitgoError::unknown_parameter("Rates", name))
    }

    fn assign(&mut self, _name: &str, _value: &Value) -> Result<bool, BitgoError> {
        Ok(false)
    }
}
