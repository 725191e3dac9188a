//! Local keychain generation.

use serde_json::Value;

use crate::error::BitgoError;
use crate::execution::http::ApiHandle;
use crate::params::{ParameterSpec, Parameters};

/// Generate a fresh keychain on the Express instance. Takes no
/// parameters; the key material never leaves the local process.
///
/// `POST /keychain/local`
pub struct CreateKeychain {
    api: ApiHandle,
}

impl CreateKeychain {
    pub(crate) fn new(api: ApiHandle) -> Self {
        Self { api }
    }

    pub async fn send(self) -> Result<Value, BitgoError> {
        self.api.post("/keychain/local", &self).await
    }
}

impl Parameters for CreateKeychain {
    fn spec(&self) -> &'static ParameterSpec {
        &ParameterSpec::EMPTY
    }

    fn get(&self, name: &str) -> Result<Value, BitgoError> {
        Err(BitgoError::unknown_parameter("CreateKeychain", name))
    }

    fn assign(&mut self, _name: &str, _value: &Value) -> Result<bool, BitgoError> {
        Ok(false)
    }
}
