//! Structure templates, identifiers, and template storage.
#![forbid(unsafe_code)]

pub mod location;
pub mod store;
pub mod template;

pub use location::{LocationError, ResourceLocation};
pub use store::{TemplateError, TemplateSource, TemplateStore};
pub use template::{Palette, StructureBlockInfo, StructureTemplate};
