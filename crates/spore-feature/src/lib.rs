//! The tag tree feature: weighted template selection, rotated placement, and decorators.
#![forbid(unsafe_code)]

pub mod config;
pub mod decorator;
pub mod diagnostics;
pub mod error;
pub mod provider;
pub mod registry;
pub mod tag_tree;
pub mod transform;
pub mod weighted;

pub use config::{TagTreeConfigDef, TagTreeConfiguration};
pub use decorator::{DecoratorContext, TreeDecorator, TreeDecoratorDef};
pub use diagnostics::{Diagnostics, LogDiagnostics, RecordingDiagnostics};
pub use error::{ConfigError, FeatureError};
pub use provider::{BlockStateProvider, BlockStateProviderDef};
pub use registry::{ConfiguredFeature, Feature, FeatureRegistry, TAG_TREE};
pub use tag_tree::{FeaturePlaceContext, PlacedTree, TagTreeFeature};
pub use weighted::{WeightedEntry, WeightedList};
