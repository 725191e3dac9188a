//! Local encryption.

use serde_json::{Map, Value, json};

use crate::error::BitgoError;
use crate::execution::http::ApiHandle;
use crate::params::{ParameterSpec, Parameters, ensure_required, expect_string, mass_assign};

/// Password-encrypt arbitrary data on the Express instance.
///
/// `POST /encrypt`
pub struct Encrypt {
    api: ApiHandle,
    password: Option<String>,
    input: Option<String>,
}

const SPEC: ParameterSpec = ParameterSpec {
    required: &["password", "input"],
    optional: &[],
    swaps: &[],
};

impl Encrypt {
    pub(crate) fn new(api: ApiHandle) -> Self {
        Self {
            api,
            password: None,
            input: None,
        }
    }

    /// The plaintext to encrypt.
    pub fn input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_params(mut self, entries: &Map<String, Value>) -> Result<Self, BitgoError> {
        mass_assign(&mut self, entries)?;
        Ok(self)
    }

    pub async fn send(self) -> Result<Value, BitgoError> {
        ensure_required(&self)?;
        self.api.post("/encrypt", &self).await
    }
}

impl Parameters for Encrypt {
    fn spec(&self) -> &'static ParameterSpec {
        &SPEC
    }

    fn get(&self, name: &str) -> Result<Value, BitgoError> {
        match name {
            "password" => Ok(json!(self.password)),
            "input" => Ok(json!(self.input)),
            _ => Err(BitgoError::unknown_parameter("Encrypt", name)),
        }
    }

    fn assign(&mut self, name: &str, value: &Value) -> Result<bool, BitgoError> {
        match name {
            "password" => self.password = Some(expect_string(name, value)?),
            "input" => self.input = Some(expect_string(name, value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::Config;
    use crate::execution::{ApiRequest, Transport};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct NullTransport;

    #[async_trait]
    impl Transport for NullTransport {
        async fn execute(&self, _request: ApiRequest) -> Result<Value, BitgoError> {
            Ok(Value::Null)
        }
    }

    fn api() -> ApiHandle {
        ApiHandle::new(Config::new("token"), None, Arc::new(NullTransport))
    }

    #[tokio::test]
    async fn password_and_input_are_both_required() {
        let err = Encrypt::new(api()).input("data").send().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "The following parameters are required: password"
        );
        assert!(
            Encrypt::new(api())
                .input("data")
                .password("pass")
                .send()
                .await
                .is_ok()
        );
    }
}
