use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use spore_blocks::BlockRegistry;
use spore_structures::ResourceLocation;

use crate::config::{TagTreeConfigDef, TagTreeConfiguration};
use crate::error::{ConfigError, FeatureError};
use crate::tag_tree::{FeaturePlaceContext, TagTreeFeature};

pub const TAG_TREE: &str = "spore:tag_tree";

/// A configured world-generation feature.
pub trait Feature: fmt::Debug + Send + Sync {
    fn place(&self, ctx: &mut FeaturePlaceContext<'_>) -> Result<bool, FeatureError>;
}

impl Feature for TagTreeFeature {
    fn place(&self, ctx: &mut FeaturePlaceContext<'_>) -> Result<bool, FeatureError> {
        TagTreeFeature::place(self, ctx)
    }
}

/// Builds a feature from the `config` table of a configured-feature file.
pub type FeatureFactory = fn(toml::Value, &BlockRegistry) -> Result<Box<dyn Feature>, ConfigError>;

#[derive(Debug)]
pub struct ConfiguredFeature {
    pub feature_type: ResourceLocation,
    pub feature: Box<dyn Feature>,
}

// type = "spore:tag_tree"
// [config]
// ...
#[derive(Deserialize)]
struct ConfiguredFeatureDef {
    #[serde(rename = "type")]
    feature_type: ResourceLocation,
    config: toml::Value,
}

#[derive(Default)]
pub struct FeatureRegistry {
    factories: HashMap<ResourceLocation, FeatureFactory>,
}

impl FeatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every feature this crate provides.
    pub fn with_builtin() -> Result<Self, ConfigError> {
        let mut reg = Self::new();
        reg.register(ResourceLocation::parse(TAG_TREE)?, tag_tree_factory)?;
        Ok(reg)
    }

    pub fn register(&mut self, name: ResourceLocation, factory: FeatureFactory) -> Result<(), ConfigError> {
        if self.factories.contains_key(&name) {
            return Err(ConfigError::DuplicateFeature(name));
        }
        log::debug!("registered feature {name}");
        self.factories.insert(name, factory);
        Ok(())
    }

    pub fn contains(&self, name: &ResourceLocation) -> bool {
        self.factories.contains_key(name)
    }

    pub fn load_configured(
        &self,
        toml_str: &str,
        blocks: &BlockRegistry,
    ) -> Result<ConfiguredFeature, ConfigError> {
        let def: ConfiguredFeatureDef = toml::from_str(toml_str)?;
        let factory = self
            .factories
            .get(&def.feature_type)
            .ok_or_else(|| ConfigError::UnknownFeature(def.feature_type.clone()))?;
        let feature = factory(def.config, blocks)?;
        Ok(ConfiguredFeature {
            feature_type: def.feature_type,
            feature,
        })
    }

    pub fn load_configured_path(
        &self,
        path: impl AsRef<Path>,
        blocks: &BlockRegistry,
    ) -> Result<ConfiguredFeature, ConfigError> {
        let s = fs::read_to_string(path)?;
        self.load_configured(&s, blocks)
    }
}

fn tag_tree_factory(
    config: toml::Value,
    blocks: &BlockRegistry,
) -> Result<Box<dyn Feature>, ConfigError> {
    let def: TagTreeConfigDef = config.try_into()?;
    let config = TagTreeConfiguration::from_def(def, blocks)?;
    Ok(Box::new(TagTreeFeature::new(config)))
}
