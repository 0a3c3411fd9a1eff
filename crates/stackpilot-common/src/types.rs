//! Domain primitive types used across the stackpilot workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::UNKNOWN;

/// Where a container image comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    /// Origin could not be determined.
    #[default]
    Unknown,
    /// Pulled from a registry.
    Hub,
    /// Built locally from a build context.
    Build,
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Hub => write!(f, "hub"),
            Self::Build => write!(f, "build"),
        }
    }
}

/// One entry of the container inventory derived from a compose service.
///
/// Serializes with fields in the order `name`, `source`, `image`,
/// `version`, `ports`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRecord {
    /// Service key in the compose file.
    pub name: String,
    /// Image origin.
    pub source: ImageSource,
    /// Repository name, or `unknown`.
    pub image: String,
    /// Image tag, or `unknown`.
    pub version: String,
    /// Published ports as written in the compose file.
    pub ports: Vec<String>,
}

impl ContainerRecord {
    /// Creates a record with every descriptive field set to `unknown`.
    #[must_use]
    pub fn unknown(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: ImageSource::Unknown,
            image: UNKNOWN.to_owned(),
            version: UNKNOWN.to_owned(),
            ports: Vec::new(),
        }
    }

    /// Creates a registry-sourced record.
    #[must_use]
    pub fn hub(
        name: impl Into<String>,
        image: impl Into<String>,
        version: impl Into<String>,
        ports: Vec<String>,
    ) -> Self {
        Self {
            source: ImageSource::Hub,
            image: image.into(),
            version: version.into(),
            ports,
            ..Self::unknown(name)
        }
    }

    /// Creates a locally built record. Image and version stay `unknown`.
    #[must_use]
    pub fn build(name: impl Into<String>, ports: Vec<String>) -> Self {
        Self {
            source: ImageSource::Build,
            ports,
            ..Self::unknown(name)
        }
    }
}
