use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Access mode of a bind mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountMode {
    ReadWrite,
    ReadOnly,
}

impl MountMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MountMode::ReadWrite => "rw",
            MountMode::ReadOnly => "ro",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "rw" => Some(MountMode::ReadWrite),
            "ro" => Some(MountMode::ReadOnly),
            _ => None,
        }
    }
}

/// Container-side target of a bind mount: a bare path, or a path with an
/// explicit access mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindTarget {
    Path(String),
    WithMode(String, MountMode),
}

impl BindTarget {
    fn render(&self, host: &str) -> String {
        match self {
            BindTarget::Path(container) => format!("{host}:{container}"),
            BindTarget::WithMode(container, mode) => {
                format!("{host}:{container}:{}", mode.as_str())
            }
        }
    }
}

/// Bind mounts for a run, keyed by host path. Ordered so the emitted flags
/// are stable across invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mounts(BTreeMap<String, BindTarget>);

impl Mounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mount with no explicit mode. Builder-style.
    pub fn bind(mut self, host: impl Into<String>, container: impl Into<String>) -> Self {
        self.0
            .insert(host.into(), BindTarget::Path(container.into()));
        self
    }

    /// Add a mount with an explicit mode. Builder-style.
    pub fn bind_with_mode(
        mut self,
        host: impl Into<String>,
        container: impl Into<String>,
        mode: MountMode,
    ) -> Self {
        self.0
            .insert(host.into(), BindTarget::WithMode(container.into(), mode));
        self
    }

    pub fn insert(&mut self, host: impl Into<String>, target: BindTarget) {
        self.0.insert(host.into(), target);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Emit one `-v host:container[:mode]` pair per entry, in map order.
    pub fn to_flags(&self) -> Vec<String> {
        let mut flags = Vec::with_capacity(self.0.len() * 2);
        for (host, target) in &self.0 {
            flags.push("-v".to_string());
            flags.push(target.render(host));
        }
        flags
    }

    /// Parse mounts from a dynamic value, as found in config files.
    ///
    /// Each entry maps a host path to either a container path string or a
    /// map with `path` and an optional `mode` (`"rw"` or `"ro"`). Anything
    /// else is rejected here, before any subprocess is spawned.
    pub fn from_value(value: &serde_yaml::Value) -> Result<Self> {
        let serde_yaml::Value::Mapping(entries) = value else {
            return Err(Error::InvalidMapping {
                host: "<mappings>".to_string(),
                reason: format!("expected a map of host paths, got {}", kind_of(value)),
            });
        };

        let mut mounts = Mounts::new();
        for (key, val) in entries {
            let Some(host) = key.as_str() else {
                return Err(Error::InvalidMapping {
                    host: "<mappings>".to_string(),
                    reason: format!("host path must be a string, got {}", kind_of(key)),
                });
            };
            mounts.insert(host, parse_target(host, val)?);
        }
        Ok(mounts)
    }
}

fn parse_target(host: &str, value: &serde_yaml::Value) -> Result<BindTarget> {
    match value {
        serde_yaml::Value::String(container) => Ok(BindTarget::Path(container.clone())),
        serde_yaml::Value::Mapping(map) => {
            let container = map
                .get("path")
                .and_then(|p| p.as_str())
                .ok_or_else(|| Error::InvalidMapping {
                    host: host.to_string(),
                    reason: "mapping object must carry a string `path`".to_string(),
                })?;
            match map.get("mode") {
                None | Some(serde_yaml::Value::Null) => {
                    Ok(BindTarget::Path(container.to_string()))
                }
                Some(serde_yaml::Value::String(mode)) => match MountMode::parse(mode) {
                    Some(mode) => Ok(BindTarget::WithMode(container.to_string(), mode)),
                    None => Err(Error::InvalidMapping {
                        host: host.to_string(),
                        reason: format!("unknown access mode `{mode}`, expected `rw` or `ro`"),
                    }),
                },
                Some(other) => Err(Error::InvalidMapping {
                    host: host.to_string(),
                    reason: format!("access mode must be a string, got {}", kind_of(other)),
                }),
            }
        }
        other => Err(Error::InvalidMapping {
            host: host.to_string(),
            reason: format!("expected a string or map, got {}", kind_of(other)),
        }),
    }
}

fn kind_of(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a bool",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a map",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}

impl Serialize for Mounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (host, target) in &self.0 {
            match target {
                BindTarget::Path(container) => map.serialize_entry(host, container)?,
                BindTarget::WithMode(container, mode) => {
                    let mut obj = BTreeMap::new();
                    obj.insert("path", container.as_str());
                    obj.insert("mode", mode.as_str());
                    map.serialize_entry(host, &obj)?;
                }
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Mounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = serde_yaml::Value::deserialize(deserializer)?;
        Mounts::from_value(&value).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for MountMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_path_has_no_mode_segment() {
        let mounts = Mounts::new().bind("/tmp/a", "/b");
        assert_eq!(mounts.to_flags(), vec!["-v", "/tmp/a:/b"]);
    }

    #[test]
    fn explicit_mode_is_appended() {
        let mounts = Mounts::new().bind_with_mode("/tmp/a", "/b", MountMode::ReadOnly);
        assert_eq!(mounts.to_flags(), vec!["-v", "/tmp/a:/b:ro"]);
    }

    #[test]
    fn flags_come_out_in_host_path_order() {
        let mounts = Mounts::new()
            .bind("/z", "/1")
            .bind_with_mode("/a", "/2", MountMode::ReadWrite);
        assert_eq!(mounts.to_flags(), vec!["-v", "/a:/2:rw", "-v", "/z:/1"]);
    }

    #[test]
    fn number_target_is_rejected() {
        let value: serde_yaml::Value = serde_yaml::from_str("/tmp/a: 42").unwrap();
        let err = Mounts::from_value(&value).unwrap_err();
        match err {
            Error::InvalidMapping { host, reason } => {
                assert_eq!(host, "/tmp/a");
                assert!(reason.contains("a number"), "reason was: {reason}");
            }
            other => panic!("expected InvalidMapping, got: {other}"),
        }
    }

    #[test]
    fn map_target_with_mode_parses() {
        let value: serde_yaml::Value =
            serde_yaml::from_str("/tmp/a:\n  path: /b\n  mode: ro").unwrap();
        let mounts = Mounts::from_value(&value).unwrap();
        assert_eq!(mounts.to_flags(), vec!["-v", "/tmp/a:/b:ro"]);
    }

    #[test]
    fn map_target_without_mode_parses_as_bare_path() {
        let value: serde_yaml::Value = serde_yaml::from_str("/tmp/a:\n  path: /b").unwrap();
        let mounts = Mounts::from_value(&value).unwrap();
        assert_eq!(mounts.to_flags(), vec!["-v", "/tmp/a:/b"]);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let value: serde_yaml::Value =
            serde_yaml::from_str("/tmp/a:\n  path: /b\n  mode: rx").unwrap();
        assert!(Mounts::from_value(&value).is_err());
    }

    #[test]
    fn deserialize_goes_through_the_same_validation() {
        let ok: Mounts = serde_yaml::from_str("/tmp/a: /b").unwrap();
        assert_eq!(ok.to_flags(), vec!["-v", "/tmp/a:/b"]);

        let bad = serde_yaml::from_str::<Mounts>("/tmp/a: 42");
        assert!(bad.is_err());
    }
}
