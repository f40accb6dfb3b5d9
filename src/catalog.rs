//! Layer Catalog - Trait Source of Truth
//!
//! Loads the ordered layer list and, per layer, the selectable elements and
//! their weights. Element indices are part of every edition's dna, so
//! enumeration order must be stable across runs and platforms: filenames
//! are sorted lexicographically, never taken in readdir order.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::LayerSpec;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Layer directory not found: {0}")]
    MissingLayer(String),

    #[error("Layer {0} has no elements")]
    EmptyLayer(String),

    #[error("Layer {layer}: {weights} weights configured for {elements} elements")]
    WeightCountMismatch {
        layer: String,
        weights: usize,
        elements: usize,
    },

    #[error("Cannot enumerate layer {0}: {1}")]
    Enumeration(String, #[source] std::io::Error),
}

/// One selectable trait image within a layer. The index is the element's
/// stable position in its layer and feeds the dna.
#[derive(Debug, Clone, Serialize)]
pub struct Element {
    pub index: usize,
    pub name: String,
    #[serde(skip)]
    pub path: PathBuf,
}

/// One trait category. `id` is the layer's position in composition order.
#[derive(Debug, Clone, Serialize)]
pub struct Layer {
    pub id: usize,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub elements: Vec<Element>,
    pub weights: Vec<f64>,
}

/// Ordered layer list for one run.
#[derive(Debug, Clone, Serialize)]
pub struct LayerCatalog {
    pub layers: Vec<Layer>,
}

impl LayerCatalog {
    /// Build the catalog from configured layer specs. Each layer reads its
    /// element directory at `<layers_dir>/<layer name>`.
    pub fn load(
        layers_dir: &Path,
        specs: &[LayerSpec],
        width: u32,
        height: u32,
    ) -> Result<Self, CatalogError> {
        let mut layers = Vec::with_capacity(specs.len());

        for (id, spec) in specs.iter().enumerate() {
            let location = layers_dir.join(&spec.name);
            let elements = enumerate_elements(&location, &spec.name)?;

            if elements.is_empty() {
                return Err(CatalogError::EmptyLayer(spec.name.clone()));
            }
            if spec.weights.len() != elements.len() {
                return Err(CatalogError::WeightCountMismatch {
                    layer: spec.name.clone(),
                    weights: spec.weights.len(),
                    elements: elements.len(),
                });
            }

            layers.push(Layer {
                id,
                name: spec.name.clone(),
                width,
                height,
                elements,
                weights: spec.weights.clone(),
            });
        }

        Ok(Self { layers })
    }

    /// Product of element counts across layers: the size of the trait
    /// space, and the hard ceiling on unique editions.
    pub fn combination_count(&self) -> usize {
        self.layers
            .iter()
            .map(|l| l.elements.len())
            .product()
    }
}

fn enumerate_elements(location: &Path, layer_name: &str) -> Result<Vec<Element>, CatalogError> {
    if !location.is_dir() {
        return Err(CatalogError::MissingLayer(location.display().to_string()));
    }

    let entries = fs::read_dir(location)
        .map_err(|e| CatalogError::Enumeration(layer_name.to_string(), e))?;

    let mut files = vec![];
    for entry in entries {
        let entry = entry.map_err(|e| CatalogError::Enumeration(layer_name.to_string(), e))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }

    // Lexicographic order keeps indices, and therefore dna strings,
    // reproducible regardless of filesystem enumeration order.
    files.sort();

    Ok(files
        .into_iter()
        .enumerate()
        .map(|(index, path)| Element {
            index,
            name: display_name(&path),
            path,
        })
        .collect())
}

/// Filename with its extension stripped.
fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn spec(name: &str, weights: &[f64]) -> LayerSpec {
        LayerSpec {
            name: name.to_string(),
            weights: weights.to_vec(),
        }
    }

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    #[test]
    fn test_elements_sorted_and_named() {
        let tmp = TempDir::new().unwrap();
        let layer_dir = tmp.path().join("Background");
        fs::create_dir(&layer_dir).unwrap();
        touch(&layer_dir, "zebra.png");
        touch(&layer_dir, "amber.png");
        touch(&layer_dir, "mint.jpeg");

        let catalog = LayerCatalog::load(
            tmp.path(),
            &[spec("Background", &[0.2, 0.3, 0.5])],
            100,
            100,
        )
        .unwrap();

        let names: Vec<_> = catalog.layers[0]
            .elements
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["amber", "mint", "zebra"]);
        assert_eq!(catalog.layers[0].elements[2].index, 2);
    }

    #[test]
    fn test_missing_layer_dir_fails() {
        let tmp = TempDir::new().unwrap();
        let result = LayerCatalog::load(tmp.path(), &[spec("Nope", &[1.0])], 100, 100);
        assert!(matches!(result, Err(CatalogError::MissingLayer(_))));
    }

    #[test]
    fn test_empty_layer_dir_fails() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("Empty")).unwrap();
        let result = LayerCatalog::load(tmp.path(), &[spec("Empty", &[])], 100, 100);
        assert!(matches!(result, Err(CatalogError::EmptyLayer(_))));
    }

    #[test]
    fn test_weight_count_checked() {
        let tmp = TempDir::new().unwrap();
        let layer_dir = tmp.path().join("Ball");
        fs::create_dir(&layer_dir).unwrap();
        touch(&layer_dir, "a.png");
        touch(&layer_dir, "b.png");

        let result = LayerCatalog::load(tmp.path(), &[spec("Ball", &[1.0])], 100, 100);
        assert!(matches!(
            result,
            Err(CatalogError::WeightCountMismatch {
                weights: 1,
                elements: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_combination_count() {
        let tmp = TempDir::new().unwrap();
        for (name, count) in [("A", 2), ("B", 3)] {
            let dir = tmp.path().join(name);
            fs::create_dir(&dir).unwrap();
            for i in 0..count {
                touch(&dir, &format!("{}.png", i));
            }
        }
        let catalog = LayerCatalog::load(
            tmp.path(),
            &[spec("A", &[0.5, 0.5]), spec("B", &[0.3, 0.3, 0.4])],
            64,
            64,
        )
        .unwrap();
        assert_eq!(catalog.combination_count(), 6);
    }
}
