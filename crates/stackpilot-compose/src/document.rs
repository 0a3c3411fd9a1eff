//! Compose file model.
//!
//! Only the fields needed for the inventory are decoded; everything else in
//! a service definition is ignored. Decoding happens once, at load time, into
//! explicit optional fields.

use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use stackpilot_common::error::{Result, StackpilotError};
use stackpilot_common::fs::FileSystem;

/// The parts of a compose service definition used by the inventory.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceDefinition {
    /// Image reference, `repository[:tag]`.
    #[serde(default)]
    pub image: Option<String>,
    /// Build context or build section. Only its presence matters.
    #[serde(default)]
    pub build: Option<Value>,
    /// Published ports.
    #[serde(default, deserialize_with = "deserialize_ports")]
    pub ports: Option<Vec<String>>,
}

impl ServiceDefinition {
    /// Returns `true` when the service is built locally.
    #[must_use]
    pub const fn is_built(&self) -> bool {
        self.build.is_some()
    }

    /// Declared ports, or an empty list.
    #[must_use]
    pub fn ports_or_empty(&self) -> Vec<String> {
        self.ports.clone().unwrap_or_default()
    }
}

/// Short-syntax port entry. YAML integers are accepted as well as strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum PortEntry {
    Text(String),
    Number(u64),
}

impl From<PortEntry> for String {
    fn from(entry: PortEntry) -> Self {
        match entry {
            PortEntry::Text(text) => text,
            PortEntry::Number(number) => number.to_string(),
        }
    }
}

fn deserialize_ports<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<PortEntry>>::deserialize(deserializer)?;
    Ok(entries.map(|list| list.into_iter().map(String::from).collect()))
}

/// A compose file reduced to its services, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposeDocument {
    /// `(service name, definition)` pairs.
    pub services: Vec<(String, ServiceDefinition)>,
}

impl ComposeDocument {
    /// Decodes compose YAML. `origin` is only used in errors.
    ///
    /// A service whose value is `null` is kept as an empty definition.
    ///
    /// # Errors
    ///
    /// Returns [`StackpilotError::MalformedDocument`] if the content is not
    /// YAML, has no `services` mapping, or a service has mistyped fields.
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        let malformed = |message: String| StackpilotError::MalformedDocument {
            path: origin.to_path_buf(),
            message,
        };

        let mut root: Value =
            serde_yaml::from_str(content).map_err(|e| malformed(format!("invalid YAML: {e}")))?;
        root.apply_merge()
            .map_err(|e| malformed(format!("invalid merge key: {e}")))?;

        let Value::Mapping(mut root) = root else {
            return Err(malformed("document root is not a mapping".into()));
        };
        let Some(services) = root.remove("services") else {
            return Err(malformed("missing `services` section".into()));
        };
        let Value::Mapping(services) = services else {
            return Err(malformed("`services` is not a mapping".into()));
        };

        let mut parsed = Vec::with_capacity(services.len());
        for (key, value) in services {
            let name = match key {
                Value::String(name) => name,
                other => {
                    return Err(malformed(format!("service name {other:?} is not a string")));
                }
            };
            let definition = if value.is_null() {
                ServiceDefinition::default()
            } else {
                serde_yaml::from_value(value)
                    .map_err(|e| malformed(format!("service \"{name}\": {e}")))?
            };
            parsed.push((name, definition));
        }

        Ok(Self { services: parsed })
    }

    /// Reads and decodes the compose file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StackpilotError::NotFound`] if the file does not exist and
    /// [`StackpilotError::MalformedDocument`] if it cannot be decoded.
    pub fn load(fs: &impl FileSystem, path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading compose file");
        let bytes = fs
            .read(path)
            .map_err(|e| StackpilotError::from_io("compose file", path, e))?;
        let content = String::from_utf8(bytes).map_err(|e| StackpilotError::MalformedDocument {
            path: path.to_path_buf(),
            message: format!("content is not valid UTF-8: {e}"),
        })?;
        Self::parse(&content, path)
    }

    /// Looks up a service by name.
    #[must_use]
    pub fn service(&self, name: &str) -> Option<&ServiceDefinition> {
        self.services
            .iter()
            .find(|(service, _)| service == name)
            .map(|(_, definition)| definition)
    }
}
