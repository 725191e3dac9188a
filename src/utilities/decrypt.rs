//! Local decryption.

use serde_json::{Map, Value, json};

use crate::error::BitgoError;
use crate::execution::http::ApiHandle;
use crate::params::{ParameterSpec, Parameters, ensure_required, expect_string, mass_assign};

/// Decrypt data previously encrypted with the matching password.
///
/// `POST /decrypt`
pub struct Decrypt {
    api: ApiHandle,
    password: Option<String>,
    input: Option<String>,
}

const SPEC: ParameterSpec = ParameterSpec {
    required: &["password", "input"],
    optional: &[],
    swaps: &[],
};

impl Decrypt {
    pub(crate) fn new(api: ApiHandle) -> Self {
        Self {
            api,
            password: None,
            input: None,
        }
    }

    /// The ciphertext to decrypt.
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
        self.api.post("/decrypt", &self).await
    }
}

impl Parameters for Decrypt {
    fn spec(&self) -> &'static ParameterSpec {
        &SPEC
    }

    fn get(&self, name: &str) -> Result<Value, BitgoError> {
        match name {
            "password" => Ok(json!(self.password)),
            "input" => Ok(json!(self.input)),
            _ => Err(BitgoError::unknown_parameter("Decrypt", name)),
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
