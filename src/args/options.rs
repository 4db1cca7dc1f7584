use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Value of a single run option.
///
/// `Flag` emits the bare `--key`, `Value` emits `--key <value>`, and `Off`
/// suppresses the flag entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Flag,
    Value(String),
    Off,
}

impl From<bool> for OptionValue {
    fn from(on: bool) -> Self {
        if on { OptionValue::Flag } else { OptionValue::Off }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Value(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Value(value)
    }
}

/// Run options keyed by flag name (without the leading dashes). Ordered so
/// the emitted flags are stable across invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunOptions(BTreeMap<String, OptionValue>);

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option. Builder-style; accepts `bool`, `&str`, `String`, or an
    /// explicit [`OptionValue`].
    pub fn set(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The caller-assigned container name, if any. Only a `Value` counts; a
    /// bare flag or a suppressed entry is treated as no name at all.
    pub fn assigned_name(&self) -> Option<&str> {
        match self.0.get("name") {
            Some(OptionValue::Value(name)) => Some(name),
            _ => None,
        }
    }

    /// Emit `--key [value]` per entry, in map order. `Off` entries emit
    /// nothing.
    pub fn to_flags(&self) -> Vec<String> {
        let mut flags = Vec::new();
        for (name, value) in &self.0 {
            match value {
                OptionValue::Flag => flags.push(format!("--{name}")),
                OptionValue::Value(v) => {
                    flags.push(format!("--{name}"));
                    flags.push(v.clone());
                }
                OptionValue::Off => {}
            }
        }
        flags
    }
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OptionValue::Flag => serializer.serialize_bool(true),
            OptionValue::Value(v) => serializer.serialize_str(v),
            OptionValue::Off => serializer.serialize_bool(false),
        }
    }
}

impl<'de> Deserialize<'de> for OptionValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OptionValueVisitor;

        impl<'de> Visitor<'de> for OptionValueVisitor {
            type Value = OptionValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a bool, a string, a number, or null")
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<OptionValue, E> {
                Ok(OptionValue::from(value))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<OptionValue, E> {
                Ok(OptionValue::Value(value.to_string()))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<OptionValue, E> {
                Ok(OptionValue::Value(value.to_string()))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<OptionValue, E> {
                Ok(OptionValue::Value(value.to_string()))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<OptionValue, E> {
                Ok(OptionValue::Value(value.to_string()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<OptionValue, E> {
                Ok(OptionValue::Flag)
            }

            fn visit_none<E: de::Error>(self) -> Result<OptionValue, E> {
                Ok(OptionValue::Flag)
            }
        }

        deserializer.deserialize_any(OptionValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_emits_bare_key() {
        let opts = RunOptions::new().set("rm", true);
        assert_eq!(opts.to_flags(), vec!["--rm"]);
    }

    #[test]
    fn value_emits_key_then_value() {
        let opts = RunOptions::new().set("name", "web");
        assert_eq!(opts.to_flags(), vec!["--name", "web"]);
    }

    #[test]
    fn off_emits_nothing() {
        let opts = RunOptions::new().set("privileged", false);
        assert!(opts.to_flags().is_empty());
    }

    #[test]
    fn flags_come_out_in_key_order() {
        let opts = RunOptions::new()
            .set("rm", true)
            .set("name", "web")
            .set("detach", false);
        assert_eq!(opts.to_flags(), vec!["--name", "web", "--rm"]);
    }

    #[test]
    fn assigned_name_requires_a_value() {
        assert_eq!(
            RunOptions::new().set("name", "web").assigned_name(),
            Some("web")
        );
        assert_eq!(RunOptions::new().set("name", true).assigned_name(), None);
        assert_eq!(RunOptions::new().set("name", false).assigned_name(), None);
        assert_eq!(RunOptions::new().assigned_name(), None);
    }

    #[test]
    fn deserialize_mixed_value_kinds() {
        let opts: RunOptions =
            serde_yaml::from_str("rm: true\nname: web\nprivileged: false\nmemory: 512\nq:")
                .unwrap();
        assert_eq!(opts.get("rm"), Some(&OptionValue::Flag));
        assert_eq!(opts.get("name"), Some(&OptionValue::Value("web".into())));
        assert_eq!(opts.get("privileged"), Some(&OptionValue::Off));
        assert_eq!(opts.get("memory"), Some(&OptionValue::Value("512".into())));
        assert_eq!(opts.get("q"), Some(&OptionValue::Flag));
    }
}
