//! Combination Recorder - Uniqueness Bookkeeping
//!
//! Derives a canonical token for a full draw and tracks which tokens a run
//! has already produced. The token doubles as the edition's dna string.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::catalog::{Element, Layer};

/// One (layer, selected element) pair, captured by value so the draw stays
/// self-contained as it flows through the pipeline.
#[derive(Debug, Clone)]
pub struct DrawPick {
    pub layer_id: usize,
    pub layer_name: String,
    pub element_index: usize,
    pub element_name: String,
    pub element_path: PathBuf,
}

impl DrawPick {
    pub fn new(layer: &Layer, element: &Element) -> Self {
        Self {
            layer_id: layer.id,
            layer_name: layer.name.clone(),
            element_index: element.index,
            element_name: element.name.clone(),
            element_path: element.path.clone(),
        }
    }
}

/// One candidate edition: one pick per layer, in layer order.
#[derive(Debug, Clone)]
pub struct Draw {
    pub picks: Vec<DrawPick>,
}

impl Draw {
    pub fn new(picks: Vec<DrawPick>) -> Self {
        Self { picks }
    }
}

/// Canonical signature for a draw: `l<layer-id>e<element-index>` segments
/// joined in layer order. Layer id stays in the token so identical index
/// vectors drawn from differently-ordered catalogs never collide, and the
/// segment markers keep multi-digit indices unambiguous.
pub fn signature_of(draw: &Draw) -> String {
    let segments: Vec<String> = draw
        .picks
        .iter()
        .map(|p| format!("l{}e{}", p.layer_id, p.element_index))
        .collect();
    segments.join("-")
}

/// Seen-signature set for a single generation run. Grows monotonically,
/// never shrinks, discarded with the run.
#[derive(Debug, Default)]
pub struct CombinationRecorder {
    seen: HashSet<String>,
}

impl CombinationRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_known(&self, signature: &str) -> bool {
        self.seen.contains(signature)
    }

    /// Idempotent: recording a known signature is a no-op.
    pub fn record(&mut self, signature: &str) {
        self.seen.insert(signature.to_string());
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
