use spore_blocks::RegistryError;
use spore_structures::{LocationError, ResourceLocation};
use thiserror::Error;

/// Load-time failures. A configuration that produced one of these is never used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read feature config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid feature config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Block(#[from] RegistryError),
    #[error("weighted list `{0}` is required")]
    MissingList(&'static str),
    #[error("At least one tree body is required.")]
    NoBodies,
    #[error("invalid block state provider: {0}")]
    Provider(String),
    #[error("invalid decorator: {0}")]
    Decorator(String),
    #[error("invalid feature identifier: {0}")]
    Location(#[from] LocationError),
    #[error("unknown feature type `{0}`")]
    UnknownFeature(ResourceLocation),
    #[error("feature type `{0}` is already registered")]
    DuplicateFeature(ResourceLocation),
}

/// Placement-time failures. Site rejection is not an error; see `TagTreeFeature::place`.
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Missing structure for: {0}")]
    MissingTemplate(ResourceLocation),
    #[error("structure {0} has no palettes")]
    NoPalettes(ResourceLocation),
}
