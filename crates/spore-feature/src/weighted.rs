use std::sync::Arc;

use rand::{Rng, RngCore};
use serde::Deserialize;
use spore_structures::{ResourceLocation, StructureTemplate, TemplateSource};

use crate::diagnostics::Diagnostics;
use crate::error::FeatureError;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct WeightedEntry {
    pub structure: ResourceLocation,
    pub weight: u32,
}

impl WeightedEntry {
    pub fn new(structure: ResourceLocation, weight: u32) -> Self {
        Self { structure, weight }
    }
}

/// Immutable list of template identifiers with integer weights.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<WeightedEntry>")]
pub struct WeightedList {
    entries: Vec<WeightedEntry>,
    total: u64,
}

impl From<Vec<WeightedEntry>> for WeightedList {
    fn from(entries: Vec<WeightedEntry>) -> Self {
        Self::new(entries)
    }
}

impl WeightedList {
    pub fn new(entries: Vec<WeightedEntry>) -> Self {
        let total = entries.iter().map(|e| e.weight as u64).sum();
        Self { entries, total }
    }

    pub fn entries(&self) -> &[WeightedEntry] {
        &self.entries
    }

    pub fn total_weight(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Draw one identifier, each with probability `weight / total`.
    ///
    /// Takes a single draw from `random` when the total weight is positive. A list whose
    /// weights never cover the draw (all zero) warns and falls back to its first entry.
    pub fn select(
        &self,
        random: &mut dyn RngCore,
        diagnostics: &dyn Diagnostics,
    ) -> Result<&ResourceLocation, FeatureError> {
        let Some(first) = self.entries.first() else {
            return Err(FeatureError::InvalidConfiguration(
                "cannot select from an empty weighted list".into(),
            ));
        };
        if self.total > 0 {
            let r = random.random_range(0..self.total);
            let mut running = 0u64;
            for entry in &self.entries {
                running += entry.weight as u64;
                if r < running {
                    return Ok(&entry.structure);
                }
            }
        }
        diagnostics.warn("Weighted list has improper weights, defaulted to first element.");
        Ok(&first.structure)
    }

    /// Select an identifier and fetch its template.
    pub fn resolve(
        &self,
        templates: &dyn TemplateSource,
        random: &mut dyn RngCore,
        diagnostics: &dyn Diagnostics,
    ) -> Result<(ResourceLocation, Arc<StructureTemplate>), FeatureError> {
        let id = self.select(random, diagnostics)?;
        match templates.get(id) {
            Some(template) => Ok((id.clone(), template)),
            None => {
                diagnostics.error(&format!("Missing structure for: {id}"));
                Err(FeatureError::MissingTemplate(id.clone()))
            }
        }
    }
}
