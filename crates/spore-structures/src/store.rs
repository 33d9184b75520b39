use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use spore_blocks::{BlockRegistry, RegistryError};
use spore_geom::Vec3i;
use thiserror::Error;

use crate::location::{LocationError, ResourceLocation};
use crate::template::{Palette, StructureBlockInfo, StructureTemplate};

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid template {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("template {path}: {source}")]
    Block {
        path: PathBuf,
        source: RegistryError,
    },
    #[error("template {path} has a negative size")]
    NegativeSize { path: PathBuf },
    #[error("template {path} has no palettes")]
    NoPalettes { path: PathBuf },
    #[error("template {path} does not map to an identifier: {source}")]
    Location {
        path: PathBuf,
        source: LocationError,
    },
}

/// Lookup of templates by identifier.
pub trait TemplateSource {
    fn get(&self, id: &ResourceLocation) -> Option<Arc<StructureTemplate>>;
}

/// In-memory template storage, optionally loaded from a directory tree.
#[derive(Default, Clone)]
pub struct TemplateStore {
    templates: HashMap<ResourceLocation, Arc<StructureTemplate>>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ResourceLocation, template: StructureTemplate) {
        self.templates.insert(id, Arc::new(template));
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Load every `<root>/<namespace>/<path>.toml` as template `namespace:path`.
    pub fn load_dir(root: impl AsRef<Path>, reg: &BlockRegistry) -> Result<Self, TemplateError> {
        let root = root.as_ref();
        let mut store = TemplateStore::new();
        let namespaces = read_dir_sorted(root)?;
        for ns_dir in namespaces.into_iter().filter(|p| p.is_dir()) {
            let Some(namespace) = ns_dir.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let namespace = namespace.to_string();
            let mut files = Vec::new();
            collect_toml_files(&ns_dir, &mut files)?;
            for file in files {
                let id = location_for(&ns_dir, &namespace, &file)?;
                let template = load_template_file(&file, reg)?;
                log::debug!(
                    "loaded template {} ({} palettes) from {}",
                    id,
                    template.palettes().len(),
                    file.display()
                );
                store.insert(id, template);
            }
        }
        log::info!("loaded {} templates from {}", store.len(), root.display());
        Ok(store)
    }
}

impl TemplateSource for TemplateStore {
    fn get(&self, id: &ResourceLocation) -> Option<Arc<StructureTemplate>> {
        self.templates.get(id).cloned()
    }
}

// size = [3, 4, 3]
// [[palettes]]
// blocks = [{ pos = [1, 0, 1], state = "red_wool" }]
#[derive(Deserialize)]
struct TemplateDef {
    size: [i32; 3],
    #[serde(default)]
    palettes: Vec<PaletteDef>,
}

#[derive(Deserialize)]
struct PaletteDef {
    #[serde(default)]
    blocks: Vec<BlockInfoDef>,
}

#[derive(Deserialize)]
struct BlockInfoDef {
    pos: [i32; 3],
    state: String,
}

pub fn parse_template(
    toml_str: &str,
    reg: &BlockRegistry,
    path: &Path,
) -> Result<StructureTemplate, TemplateError> {
    let def: TemplateDef = toml::from_str(toml_str).map_err(|source| TemplateError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    if def.size.iter().any(|&c| c < 0) {
        return Err(TemplateError::NegativeSize {
            path: path.to_path_buf(),
        });
    }
    if def.palettes.is_empty() {
        return Err(TemplateError::NoPalettes {
            path: path.to_path_buf(),
        });
    }
    let mut palettes = Vec::with_capacity(def.palettes.len());
    for p in def.palettes {
        let mut blocks = Vec::with_capacity(p.blocks.len());
        for b in p.blocks {
            let block = reg
                .parse_state(&b.state)
                .map_err(|source| TemplateError::Block {
                    path: path.to_path_buf(),
                    source,
                })?;
            blocks.push(StructureBlockInfo {
                pos: Vec3i::from(b.pos),
                block,
            });
        }
        palettes.push(Palette::new(blocks));
    }
    Ok(StructureTemplate::new(Vec3i::from(def.size), palettes))
}

pub fn load_template_file(
    path: &Path,
    reg: &BlockRegistry,
) -> Result<StructureTemplate, TemplateError> {
    let s = fs::read_to_string(path).map_err(|source| TemplateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_template(&s, reg, path)
}

fn read_dir_sorted(dir: &Path) -> Result<Vec<PathBuf>, TemplateError> {
    let io_err = |source| TemplateError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut out = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        out.push(entry.map_err(io_err)?.path());
    }
    // Directory order is platform dependent; keep loading deterministic.
    out.sort();
    Ok(out)
}

fn collect_toml_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), TemplateError> {
    for path in read_dir_sorted(dir)? {
        if path.is_dir() {
            collect_toml_files(&path, out)?;
        } else if path.extension().is_some_and(|e| e == "toml") {
            out.push(path);
        }
    }
    Ok(())
}

fn location_for(
    ns_dir: &Path,
    namespace: &str,
    file: &Path,
) -> Result<ResourceLocation, TemplateError> {
    let rel = file.strip_prefix(ns_dir).unwrap_or(file).with_extension("");
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    ResourceLocation::new(namespace, &parts.join("/")).map_err(|source| TemplateError::Location {
        path: file.to_path_buf(),
        source,
    })
}
