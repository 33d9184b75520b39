use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use spore_blocks::BlockRegistry;

use crate::decorator::{TreeDecorator, TreeDecoratorDef};
use crate::error::ConfigError;
use crate::provider::{BlockStateProvider, BlockStateProviderDef};
use crate::weighted::WeightedList;

pub const BODIES: &str = "bodies";
pub const CANOPIES: &str = "canopies";

/// Declarative form of a tag tree, as read from TOML.
#[derive(Clone, Debug, Deserialize)]
pub struct TagTreeConfigDef {
    pub weighted_lists: BTreeMap<String, WeightedList>,
    pub log: BlockStateProviderDef,
    pub leaves: BlockStateProviderDef,
    #[serde(default)]
    pub decorators: Vec<TreeDecoratorDef>,
}

/// Resolved, immutable tag tree configuration.
#[derive(Debug)]
pub struct TagTreeConfiguration {
    weighted_lists: BTreeMap<String, WeightedList>,
    log: BlockStateProvider,
    leaves: BlockStateProvider,
    decorators: Vec<Box<dyn TreeDecorator>>,
}

impl TagTreeConfiguration {
    /// Assemble without validation; placement still rejects a missing or empty body list.
    pub fn new(
        weighted_lists: BTreeMap<String, WeightedList>,
        log: BlockStateProvider,
        leaves: BlockStateProvider,
        decorators: Vec<Box<dyn TreeDecorator>>,
    ) -> Self {
        Self {
            weighted_lists,
            log,
            leaves,
            decorators,
        }
    }

    pub fn from_def(def: TagTreeConfigDef, reg: &BlockRegistry) -> Result<Self, ConfigError> {
        // Only the exact keys `bodies` and `canopies` are ever looked up; both must exist.
        for key in def.weighted_lists.keys() {
            if key != BODIES && key != CANOPIES {
                log::warn!("weighted list `{key}` is not used by the tag tree");
            }
        }
        match def.weighted_lists.get(BODIES) {
            None => return Err(ConfigError::MissingList(BODIES)),
            Some(list) if list.is_empty() => return Err(ConfigError::NoBodies),
            Some(_) => {}
        }
        if !def.weighted_lists.contains_key(CANOPIES) {
            return Err(ConfigError::MissingList(CANOPIES));
        }
        let log = def.log.compile(reg)?;
        let leaves = def.leaves.compile(reg)?;
        let decorators = def
            .decorators
            .iter()
            .map(|d| d.compile(reg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(def.weighted_lists, log, leaves, decorators))
    }

    pub fn from_toml_str(toml_str: &str, reg: &BlockRegistry) -> Result<Self, ConfigError> {
        let def: TagTreeConfigDef = toml::from_str(toml_str)?;
        Self::from_def(def, reg)
    }

    pub fn from_path(path: impl AsRef<Path>, reg: &BlockRegistry) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s, reg)
    }

    pub fn bodies(&self) -> Option<&WeightedList> {
        self.weighted_lists.get(BODIES)
    }

    pub fn canopies(&self) -> Option<&WeightedList> {
        self.weighted_lists.get(CANOPIES)
    }

    pub fn weighted_lists(&self) -> &BTreeMap<String, WeightedList> {
        &self.weighted_lists
    }

    pub fn log(&self) -> &BlockStateProvider {
        &self.log
    }

    pub fn leaves(&self) -> &BlockStateProvider {
        &self.leaves
    }

    pub fn decorators(&self) -> &[Box<dyn TreeDecorator>] {
        &self.decorators
    }
}
