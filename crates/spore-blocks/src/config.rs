use std::collections::HashMap;

use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct BlocksConfig {
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
}

// [[blocks]]
// name = "oak_log"
// solid = true
// tags = ["logs"]
// state_schema = { axis = ["y", "x", "z"] }
#[derive(Clone, Debug, Deserialize)]
pub struct BlockDef {
    pub name: String,
    /// Whether the block presents a sturdy top face. Defaults to true.
    pub solid: Option<bool>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Property name -> allowed values; the first value is the default.
    pub state_schema: Option<HashMap<String, Vec<String>>>,
}

impl BlockDef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            solid: None,
            tags: Vec::new(),
            state_schema: None,
        }
    }
}
