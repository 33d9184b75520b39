use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use thiserror::Error;

use super::config::{BlockDef, BlocksConfig};
use super::types::{Block, BlockId, BlockState};
use super::{AIR, WATER};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read block registry: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid block registry: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("block `{0}` is defined more than once")]
    Duplicate(String),
    #[error("too many block types (max {})", BlockId::MAX)]
    TooManyBlocks,
    #[error("block `{name}` has a state schema wider than 16 bits")]
    StateTooWide { name: String },
    #[error("unknown block `{0}`")]
    UnknownBlock(String),
    #[error("block `{block}` has no property `{prop}`")]
    UnknownProperty { block: String, prop: String },
    #[error("`{value}` is not a valid value of `{block}[{prop}]`")]
    UnknownValue {
        block: String,
        prop: String,
        value: String,
    },
    #[error("malformed block state `{0}`")]
    MalformedState(String),
}

#[derive(Clone, Debug)]
pub struct StateField {
    pub name: String,
    pub values: Vec<String>,
    pub bits: u32,
    pub offset: u32,
}

#[derive(Clone, Debug)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    pub solid: bool,
    // Sorted layout for state packing/unpacking
    pub state_fields: Vec<StateField>,
    pub prop_index: HashMap<String, usize>,
}

impl BlockType {
    pub fn is_solid(&self, _state: BlockState) -> bool {
        self.solid
    }

    pub fn state_prop_value<'a>(&'a self, state: BlockState, prop: &str) -> Option<&'a str> {
        let &i = self.prop_index.get(prop)?;
        let f = &self.state_fields[i];
        if f.bits == 0 {
            return f.values.first().map(|s| s.as_str());
        }
        let mask = (1u32 << f.bits) - 1;
        let idx = (((state as u32) >> f.offset) & mask) as usize;
        f.values.get(idx).map(|s| s.as_str())
    }

    pub fn state_prop_is_value(&self, state: BlockState, prop: &str, expect: &str) -> bool {
        self.state_prop_value(state, prop) == Some(expect)
    }

    /// Replace one property of `state`. Fails if the property or value is not in the schema.
    pub fn with_prop(
        &self,
        state: BlockState,
        prop: &str,
        value: &str,
    ) -> Result<BlockState, RegistryError> {
        let &i = self
            .prop_index
            .get(prop)
            .ok_or_else(|| RegistryError::UnknownProperty {
                block: self.name.clone(),
                prop: prop.to_string(),
            })?;
        let f = &self.state_fields[i];
        let sel = f
            .values
            .iter()
            .position(|v| v == value)
            .ok_or_else(|| RegistryError::UnknownValue {
                block: self.name.clone(),
                prop: prop.to_string(),
                value: value.to_string(),
            })? as u32;
        if f.bits == 0 {
            return Ok(state);
        }
        let mask = ((1u32 << f.bits) - 1) << f.offset;
        Ok((((state as u32) & !mask) | (sel << f.offset)) as BlockState)
    }

    /// Pack a full property map; missing properties take their first value.
    pub fn pack_state(&self, props: &HashMap<String, String>) -> Result<BlockState, RegistryError> {
        let mut state: BlockState = 0;
        for (prop, value) in props {
            state = self.with_prop(state, prop, value)?;
        }
        Ok(state)
    }

    pub fn has_prop(&self, prop: &str) -> bool {
        self.prop_index.contains_key(prop)
    }
}

#[derive(Clone, Debug, Default)]
pub struct BlockRegistry {
    pub blocks: Vec<BlockType>,
    pub by_name: HashMap<String, BlockId>,
    tags: HashMap<String, HashSet<BlockId>>,
    water: Option<BlockId>,
}

impl BlockRegistry {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, RegistryError> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Self::from_configs(cfg)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn from_configs(cfg: BlocksConfig) -> Result<Self, RegistryError> {
        let mut reg = BlockRegistry::default();
        // `air` always occupies id 0 whether or not the config declares it.
        let mut defs = cfg.blocks;
        match defs.iter().position(|d| d.name == AIR) {
            Some(0) => {}
            Some(i) => {
                let air = defs.remove(i);
                defs.insert(0, air);
            }
            None => {
                let mut air = BlockDef::named(AIR);
                air.solid = Some(false);
                defs.insert(0, air);
            }
        }
        for def in defs {
            if reg.by_name.contains_key(&def.name) {
                return Err(RegistryError::Duplicate(def.name));
            }
            let id = BlockId::try_from(reg.blocks.len()).map_err(|_| RegistryError::TooManyBlocks)?;
            let schema = def.state_schema.unwrap_or_default();
            let (state_fields, prop_index) = compute_state_layout(&schema);
            let total_bits: u32 = state_fields.iter().map(|f| f.bits).sum();
            if total_bits > BlockState::BITS {
                return Err(RegistryError::StateTooWide { name: def.name });
            }
            for tag in def.tags {
                reg.tags.entry(tag).or_default().insert(id);
            }
            if def.name == WATER {
                reg.water = Some(id);
            }
            reg.by_name.insert(def.name.clone(), id);
            reg.blocks.push(BlockType {
                id,
                name: def.name,
                // air is never solid, even when declared so
                solid: id != 0 && def.solid.unwrap_or(true),
                state_fields,
                prop_index,
            });
        }
        Ok(reg)
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(id as usize)
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(strip_namespace(name)).copied()
    }

    pub fn default_block(&self, name: &str) -> Result<Block, RegistryError> {
        self.id_by_name(name)
            .map(|id| Block::new(id, 0))
            .ok_or_else(|| RegistryError::UnknownBlock(name.to_string()))
    }

    /// Parse `name` or `name[prop=value,...]`; a leading `minecraft:` is accepted.
    pub fn parse_state(&self, key: &str) -> Result<Block, RegistryError> {
        let key = key.trim();
        let (base, props) = match key.split_once('[') {
            Some((base, rest)) => {
                let inner = rest
                    .strip_suffix(']')
                    .ok_or_else(|| RegistryError::MalformedState(key.to_string()))?;
                (base, inner)
            }
            None => (key, ""),
        };
        let block = self.default_block(base)?;
        let Some(ty) = self.get(block.id) else {
            return Err(RegistryError::UnknownBlock(base.to_string()));
        };
        let mut state = block.state;
        for pair in props.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (prop, value) = pair
                .split_once('=')
                .ok_or_else(|| RegistryError::MalformedState(key.to_string()))?;
            state = ty.with_prop(state, prop.trim(), value.trim())?;
        }
        Ok(Block::new(block.id, state))
    }

    /// Inverse of [`parse_state`](Self::parse_state), properties in layout order.
    pub fn describe(&self, block: Block) -> String {
        let Some(ty) = self.get(block.id) else {
            return format!("#{}", block.id);
        };
        if ty.state_fields.is_empty() {
            return ty.name.clone();
        }
        let props: Vec<String> = ty
            .state_fields
            .iter()
            .map(|f| {
                let v = ty.state_prop_value(block.state, &f.name).unwrap_or("?");
                format!("{}={}", f.name, v)
            })
            .collect();
        format!("{}[{}]", ty.name, props.join(","))
    }

    pub fn name_of(&self, block: Block) -> Option<&str> {
        self.get(block.id).map(|t| t.name.as_str())
    }

    pub fn has_tag(&self, block: Block, tag: &str) -> bool {
        self.tags.get(tag).is_some_and(|set| set.contains(&block.id))
    }

    pub fn is_water(&self, block: Block) -> bool {
        self.water == Some(block.id)
    }

    /// Unknown ids are treated as non-solid.
    pub fn is_solid(&self, block: Block) -> bool {
        self.get(block.id).is_some_and(|t| t.is_solid(block.state))
    }
}

#[inline]
fn strip_namespace(name: &str) -> &str {
    name.strip_prefix("minecraft:").unwrap_or(name)
}

fn compute_state_layout(
    schema: &HashMap<String, Vec<String>>,
) -> (Vec<StateField>, HashMap<String, usize>) {
    let mut keys: Vec<&String> = schema.keys().collect();
    keys.sort();
    let mut offset: u32 = 0;
    let mut fields: Vec<StateField> = Vec::with_capacity(keys.len());
    for k in keys {
        let vals = schema.get(k).cloned().unwrap_or_default();
        let vlen = vals.len() as u32;
        let bits: u32 = if vlen <= 1 {
            0
        } else {
            32 - (vlen - 1).leading_zeros()
        };
        fields.push(StateField {
            name: k.to_string(),
            values: vals,
            bits,
            offset,
        });
        offset = offset.saturating_add(bits);
    }
    let index = fields
        .iter()
        .enumerate()
        .map(|(i, f)| (f.name.clone(), i))
        .collect();
    (fields, index)
}
