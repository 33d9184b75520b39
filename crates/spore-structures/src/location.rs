use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_NAMESPACE: &str = "minecraft";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("empty resource location")]
    Empty,
    #[error("invalid character in namespace of `{0}`")]
    Namespace(String),
    #[error("invalid character in path of `{0}`")]
    Path(String),
}

/// Namespaced identifier, written `namespace:path`. A bare `path` lands in `minecraft`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct ResourceLocation {
    namespace: String,
    path: String,
}

impl ResourceLocation {
    pub fn new(namespace: &str, path: &str) -> Result<Self, LocationError> {
        let full = format!("{namespace}:{path}");
        if path.is_empty() {
            return Err(LocationError::Empty);
        }
        if namespace.is_empty() || !namespace.chars().all(valid_namespace_char) {
            return Err(LocationError::Namespace(full));
        }
        if !path.chars().all(valid_path_char) {
            return Err(LocationError::Path(full));
        }
        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    pub fn parse(s: &str) -> Result<Self, LocationError> {
        match s.split_once(':') {
            Some((ns, path)) => Self::new(ns, path),
            None => Self::new(DEFAULT_NAMESPACE, s),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

fn valid_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.')
}

fn valid_path_char(c: char) -> bool {
    valid_namespace_char(c) || c == '/'
}

impl FromStr for ResourceLocation {
    type Err = LocationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ResourceLocation {
    type Error = LocationError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}
