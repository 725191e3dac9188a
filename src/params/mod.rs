//! Request parameter declarations, validation, and payload projection.
//!
//! Every request builder declares a static [`ParameterSpec`] (which
//! parameter names are required, which are optional, and which swap
//! groups may jointly substitute for a required name) and implements
//! [`Parameters`], the accessor surface the engine reads and writes
//! through. Accessors are explicit `match` arms registered per builder;
//! there is no reflection. A spec naming a parameter the builder cannot
//! access is a [`BitgoError::Configuration`] fault, never reachable from
//! end-user input.
//!
//! The engine itself is three pure functions:
//! - [`ensure_required`] decides whether a builder may be submitted and
//!   reports every unmet requirement in one message;
//! - [`project`] filters the builder's current values into the flat
//!   mapping sent as the request body or query;
//! - [`mass_assign`] bulk-sets fields from a key/value mapping.

use serde_json::{Map, Value};

use crate::error::BitgoError;

/// A set of parameter names that, when all present, jointly substitute
/// for a different single required parameter.
#[derive(Debug, Clone, Copy)]
pub struct SwapRule {
    /// The required name this rule applies to.
    pub name: &'static str,
    /// Alternative groups; any one fully-present group satisfies the
    /// requirement.
    pub alternatives: &'static [&'static [&'static str]],
}

/// Per-request-type parameter declaration, immutable at construction.
///
/// Ordering of `required` and `optional` is irrelevant for correctness
/// but fixes the order of diagnostic messages and projected payloads.
#[derive(Debug, Clone, Copy)]
pub struct ParameterSpec {
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
    pub swaps: &'static [SwapRule],
}

impl ParameterSpec {
    /// Spec for operations that take no parameters at all.
    pub const EMPTY: ParameterSpec = ParameterSpec {
        required: &[],
        optional: &[],
        swaps: &[],
    };

    fn swap_rule(&self, name: &str) -> Option<&SwapRule> {
        self.swaps.iter().find(|rule| rule.name == name)
    }

    /// Every declared name, required first, then optional.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.required.iter().chain(self.optional).copied()
    }
}

/// The accessor surface of a request builder.
///
/// `get` returns `Value::Null` for an unset field and fails with a
/// configuration fault for a name that has no accessor arm. `assign`
/// returns `Ok(false)` for a name with no matching setter (the caller
/// decides whether to care) and an error when the setter rejects the
/// value itself.
pub trait Parameters {
    fn spec(&self) -> &'static ParameterSpec;

    fn get(&self, name: &str) -> Result<Value, BitgoError>;

    fn assign(&mut self, name: &str, value: &Value) -> Result<bool, BitgoError>;
}

/// Presence test used for payload projection and swap-group members.
///
/// Null, `false`, zero, the empty string, and empty collections all
/// count as absent and are never sent to the server.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
    }
}

/// Check that every required parameter is satisfied, either directly or
/// through one of its swap groups.
///
/// A required name with a `Null` value and no swap rule is reported
/// verbatim. With a swap rule, each alternative group is evaluated: a
/// group counts only when every member is present, and one satisfied
/// group clears the requirement. Otherwise the report lists the name
/// together with all of its alternatives, e.g.
/// `[prv or walletPassphrase & keychain or walletPassphrase & key]`.
///
/// All unmet requirements are accumulated into a single
/// [`BitgoError::MissingParameter`] in declaration order.
pub fn ensure_required<P: Parameters + ?Sized>(params: &P) -> Result<(), BitgoError> {
    let spec = params.spec();
    let mut missing: Vec<String> = Vec::new();

    for &name in spec.required {
        if !params.get(name)?.is_null() {
            continue;
        }

        match spec.swap_rule(name) {
            None => missing.push(name.to_string()),
            Some(rule) => {
                let mut satisfied = false;
                for group in rule.alternatives {
                    let mut complete = true;
                    for &member in *group {
                        if !is_present(&params.get(member)?) {
                            complete = false;
                            break;
                        }
                    }
                    if complete {
                        satisfied = true;
                        break;
                    }
                }

                if !satisfied {
                    let alternatives = rule
                        .alternatives
                        .iter()
                        .map(|group| group.join(" & "))
                        .collect::<Vec<_>>()
                        .join(" or ");
                    missing.push(format!("[{name} or {alternatives}]"));
                }
            }
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(BitgoError::missing_parameters(missing))
    }
}

/// Project the builder's current values into the outgoing payload:
/// required names first, then optional names, both in declared order,
/// keeping only present values.
///
/// No validation happens here; callers run [`ensure_required`] first, or
/// skip it deliberately for query operations with no required fields.
pub fn project<P: Parameters + ?Sized>(params: &P) -> Result<Map<String, Value>, BitgoError> {
    let spec = params.spec();
    let mut payload = Map::new();

    for name in spec.names() {
        let value = params.get(name)?;
        if is_present(&value) {
            payload.insert(name.to_string(), value);
        }
    }

    Ok(payload)
}

/// Bulk-assign fields from a key/value mapping.
///
/// Keys without a matching setter are skipped, preserving the permissive
/// source behavior; each skip is logged at debug level so caller typos
/// remain diagnosable. A matched setter that rejects its value aborts
/// the whole assignment.
pub fn mass_assign<P: Parameters + ?Sized>(
    params: &mut P,
    entries: &Map<String, Value>,
) -> Result<(), BitgoError> {
    for (key, value) in entries {
        if !params.assign(key, value)? {
            tracing::debug!(parameter = %key, "ignoring unknown key in mass-assignment");
        }
    }
    Ok(())
}

// Conversion helpers shared by builder setters. Each rejects a
// wrongly-typed mass-assignment value with the parameter name in the
// message.

pub(crate) fn expect_string(name: &str, value: &Value) -> Result<String, BitgoError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| type_mismatch(name, "a string", value))
}

pub(crate) fn expect_u64(name: &str, value: &Value) -> Result<u64, BitgoError> {
    value
        .as_u64()
        .ok_or_else(|| type_mismatch(name, "an unsigned integer", value))
}

pub(crate) fn expect_bool(name: &str, value: &Value) -> Result<bool, BitgoError> {
    value
        .as_bool()
        .ok_or_else(|| type_mismatch(name, "a boolean", value))
}

fn type_mismatch(name: &str, expected: &str, value: &Value) -> BitgoError {
    BitgoError::InvalidRequest(format!(
        "the '{name}' parameter expects {expected}, got: {value}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Minimal builder covering the swap-group declaration from the
    /// transaction-signing operation.
    #[derive(Default)]
    struct SignLike {
        prv: Option<String>,
        key: Option<Value>,
        wallet_id: Option<String>,
        keychain: Option<Value>,
        tx_prebuild: Option<Value>,
        wallet_passphrase: Option<String>,
    }

    const SIGN_SPEC: ParameterSpec = ParameterSpec {
        required: &[
            "prv",
            "key",
            "walletId",
            "keychain",
            "txPrebuild",
            "walletPassphrase",
        ],
        optional: &["coldDerivationSeed"],
        swaps: &[
            SwapRule {
                name: "prv",
                alternatives: &[&["walletPassphrase", "keychain"], &["walletPassphrase", "key"]],
            },
            SwapRule {
                name: "walletPassphrase",
                alternatives: &[&["prv"]],
            },
            SwapRule {
                name: "key",
                alternatives: &[&["keychain"], &["prv"]],
            },
            SwapRule {
                name: "keychain",
                alternatives: &[&["prv"], &["key"]],
            },
        ],
    };

    impl Parameters for SignLike {
        fn spec(&self) -> &'static ParameterSpec {
            &SIGN_SPEC
        }

        fn get(&self, name: &str) -> Result<Value, BitgoError> {
            match name {
                "prv" => Ok(json!(self.prv)),
                "key" => Ok(json!(self.key)),
                "walletId" => Ok(json!(self.wallet_id)),
                "keychain" => Ok(json!(self.keychain)),
                "txPrebuild" => Ok(json!(self.tx_prebuild)),
                "walletPassphrase" => Ok(json!(self.wallet_passphrase)),
                "coldDerivationSeed" => Ok(Value::Null),
                _ => Err(BitgoError::unknown_parameter("SignLike", name)),
            }
        }

        fn assign(&mut self, name: &str, value: &Value) -> Result<bool, BitgoError> {
            match name {
                "prv" => self.prv = Some(expect_string(name, value)?),
                "walletId" => self.wallet_id = Some(expect_string(name, value)?),
                "walletPassphrase" => self.wallet_passphrase = Some(expect_string(name, value)?),
                "keychain" => self.keychain = Some(value.clone()),
                "key" => self.key = Some(value.clone()),
                "txPrebuild" => self.tx_prebuild = Some(value.clone()),
                _ => return Ok(false),
            }
            Ok(true)
        }
    }

    #[derive(Default)]
    struct Bare;

    impl Parameters for Bare {
        fn spec(&self) -> &'static ParameterSpec {
            &ParameterSpec::EMPTY
        }

        fn get(&self, name: &str) -> Result<Value, BitgoError> {
            Err(BitgoError::unknown_parameter("Bare", name))
        }

        fn assign(&mut self, _name: &str, _value: &Value) -> Result<bool, BitgoError> {
            Ok(false)
        }
    }

    #[test]
    fn empty_required_list_always_passes() {
        assert!(ensure_required(&Bare).is_ok());
    }

    #[test]
    fn bare_missing_names_appear_verbatim() {
        #[derive(Default)]
        struct TwoRequired {
            a: Option<String>,
        }
        const SPEC: ParameterSpec = ParameterSpec {
            required: &["alpha", "beta"],
            optional: &[],
            swaps: &[],
        };
        impl Parameters for TwoRequired {
            fn spec(&self) -> &'static ParameterSpec {
                &SPEC
            }
            fn get(&self, name: &str) -> Result<Value, BitgoError> {
                match name {
                    "alpha" => Ok(json!(self.a)),
                    "beta" => Ok(Value::Null),
                    _ => Err(BitgoError::unknown_parameter("TwoRequired", name)),
                }
            }
            fn assign(&mut self, name: &str, value: &Value) -> Result<bool, BitgoError> {
                match name {
                    "alpha" => self.a = Some(expect_string(name, value)?),
                    _ => return Ok(false),
                }
                Ok(true)
            }
        }

        let err = ensure_required(&TwoRequired::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The following parameters are required: alpha, beta"
        );

        let mut partial = TwoRequired::default();
        partial.a = Some("set".into());
        let err = ensure_required(&partial).unwrap_err();
        assert_eq!(err.to_string(), "The following parameters are required: beta");
    }

    #[test]
    fn satisfied_swap_group_clears_the_keyed_name() {
        let mut params = SignLike::default();
        params.wallet_id = Some("w".into());
        params.tx_prebuild = Some(json!({"txHex": "00"}));
        params.prv = Some("xprv...".into());

        // prv set directly; key/keychain/walletPassphrase all clear via
        // their [prv] groups.
        assert!(ensure_required(&params).is_ok());
    }

    #[test]
    fn passphrase_plus_keychain_substitutes_for_prv() {
        let mut params = SignLike::default();
        params.wallet_id = Some("w".into());
        params.tx_prebuild = Some(json!({"txHex": "00"}));
        params.wallet_passphrase = Some("pass".into());
        params.keychain = Some(json!({"encryptedPrv": "..."}));

        assert!(ensure_required(&params).is_ok());
    }

    #[test]
    fn unmet_swap_groups_report_every_alternative() {
        let mut params = SignLike::default();
        params.wallet_id = Some("w".into());
        params.tx_prebuild = Some(json!({"txHex": "00"}));

        let err = ensure_required(&params).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The following parameters are required: \
             [prv or walletPassphrase & keychain or walletPassphrase & key], \
             [key or keychain or prv], \
             [keychain or prv or key], \
             [walletPassphrase or prv]"
        );
    }

    #[test]
    fn passphrase_alone_cannot_satisfy_pairwise_groups() {
        let mut params = SignLike::default();
        params.wallet_id = Some("w".into());
        params.tx_prebuild = Some(json!({"txHex": "00"}));
        params.wallet_passphrase = Some("pass".into());

        // prv's groups need a pair, and key/keychain are still unmet.
        let err = ensure_required(&params).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("[prv or walletPassphrase & keychain or walletPassphrase & key]"));
        assert!(message.contains("[key or keychain or prv]"));
        assert!(message.contains("[keychain or prv or key]"));
        assert!(!message.contains("walletPassphrase or prv]"));
    }

    #[test]
    fn projection_keeps_declared_order_and_drops_absent_values() {
        let mut params = SignLike::default();
        params.wallet_id = Some("w".into());
        params.wallet_passphrase = Some(String::new()); // empty: dropped
        params.tx_prebuild = Some(json!({"txHex": "00"}));

        let payload = project(&params).unwrap();
        let keys: Vec<&str> = payload.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["walletId", "txPrebuild"]);
    }

    #[test]
    fn projection_drops_zero_and_false() {
        assert!(!is_present(&json!(0)));
        assert!(!is_present(&json!(0.0)));
        assert!(!is_present(&json!(false)));
        assert!(!is_present(&json!("")));
        assert!(!is_present(&json!([])));
        assert!(!is_present(&json!({})));
        assert!(is_present(&json!(1)));
        assert!(is_present(&json!("x")));
        assert!(is_present(&json!([0])));
    }

    #[test]
    fn mass_assign_round_trips_and_skips_unknown_keys() {
        let mut params = SignLike::default();
        let entries = json!({
            "walletId": "w-1",
            "prv": "xprv9s21",
            "definitelyNotAField": 42
        });
        let Value::Object(entries) = entries else {
            unreachable!()
        };

        mass_assign(&mut params, &entries).unwrap();
        assert_eq!(params.get("walletId").unwrap(), json!("w-1"));
        assert_eq!(params.get("prv").unwrap(), json!("xprv9s21"));
    }

    #[test]
    fn mass_assign_propagates_setter_rejections() {
        let mut params = SignLike::default();
        let entries = json!({ "walletId": 17 });
        let Value::Object(entries) = entries else {
            unreachable!()
        };

        assert!(matches!(
            mass_assign(&mut params, &entries),
            Err(BitgoError::InvalidRequest(_))
        ));
    }

    #[test]
    fn undeclared_accessor_is_a_configuration_fault() {
        let err = SignLike::default().get("ghost").unwrap_err();
        assert!(matches!(err, BitgoError::Configuration(_)));
    }
}
