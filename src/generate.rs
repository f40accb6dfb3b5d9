//! Edition Generator - Run Orchestration
//!
//! Drives draw -> uniqueness check -> compose -> publish -> record for N
//! editions. Uniqueness retries are bounded; every other failure aborts
//! the run, surfacing the edition index and the partial manifest.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::LayerCatalog;
use crate::compose::{Compositor, CompositionError};
use crate::metadata::{build_attributes, build_record, EditionRecord};
use crate::publish::{PublishError, PublishSink};
use crate::select::WeightedSelector;
use crate::signature::{signature_of, CombinationRecorder, Draw, DrawPick};
use crate::ENGINE_VERSION;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Composition(#[from] CompositionError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error("Trait space exhausted after {collisions} collisions with {requested} editions requested; lower the edition count or add trait variety")]
    ExhaustedSpace { collisions: usize, requested: usize },
}

/// Run failure: where it happened and everything produced before it, so a
/// caller may keep partial results.
#[derive(Debug, Error)]
#[error("Run aborted at edition {edition}: {kind}")]
pub struct RunError {
    pub edition: usize,
    pub manifest: Vec<EditionRecord>,
    #[source]
    pub kind: GeneratorError,
}

/// Output of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunManifest {
    pub run_id: Uuid,
    pub engine_version: String,
    pub width: u32,
    pub height: u32,
    pub requested: usize,
    pub editions: Vec<EditionRecord>,
}

/// Owns the run's uniqueness state and drives the per-edition pipeline.
/// Consumed by `run`: the seen-signature set lives exactly one run.
pub struct EditionGenerator<R: Rng> {
    catalog: LayerCatalog,
    selector: WeightedSelector<R>,
    compositor: Compositor,
    recorder: CombinationRecorder,
    width: u32,
    height: u32,
}

impl EditionGenerator<StdRng> {
    pub fn new(catalog: LayerCatalog, width: u32, height: u32) -> Self {
        Self::with_parts(
            catalog,
            WeightedSelector::from_entropy(),
            Compositor::new(width, height),
            width,
            height,
        )
    }

    /// Seeded construction for reproducible runs.
    pub fn with_seed(catalog: LayerCatalog, width: u32, height: u32, seed: u64) -> Self {
        Self::with_parts(
            catalog,
            WeightedSelector::from_seed(seed),
            Compositor::new(width, height),
            width,
            height,
        )
    }
}

impl<R: Rng> EditionGenerator<R> {
    pub fn with_parts(
        catalog: LayerCatalog,
        selector: WeightedSelector<R>,
        compositor: Compositor,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            catalog,
            selector,
            compositor,
            recorder: CombinationRecorder::new(),
            width,
            height,
        }
    }

    /// One selector call per layer, in layer order.
    fn next_draw(&mut self) -> Draw {
        let selector = &mut self.selector;
        let picks: Vec<DrawPick> = self
            .catalog
            .layers
            .iter()
            .map(|layer| {
                let index = selector.select(&layer.weights);
                DrawPick::new(layer, &layer.elements[index])
            })
            .collect();
        Draw::new(picks)
    }

    /// Generate `requested` editions through `sink`. Each edition's full
    /// pipeline completes before uniqueness state is mutated; the
    /// signature is only recorded after its image has been published.
    pub fn run(
        mut self,
        requested: usize,
        sink: &mut dyn PublishSink,
    ) -> Result<RunManifest, RunError> {
        let mut editions: Vec<EditionRecord> = Vec::with_capacity(requested);

        for edition in 0..requested {
            // Drawing / uniqueness check. The collision counter is per
            // edition slot; exceeding the requested count means the trait
            // space cannot supply this many unique combinations.
            let mut collisions = 0usize;
            let (draw, signature) = loop {
                let draw = self.next_draw();
                let signature = signature_of(&draw);
                if !self.recorder.is_known(&signature) {
                    break (draw, signature);
                }
                collisions += 1;
                if collisions > requested {
                    return Err(RunError {
                        edition,
                        manifest: editions,
                        kind: GeneratorError::ExhaustedSpace {
                            collisions,
                            requested,
                        },
                    });
                }
            };

            // Composing. No retry: a load failure means a corrupt or
            // missing asset, not transient contention.
            let canvas = match self.compositor.compose(&draw) {
                Ok(canvas) => canvas,
                Err(e) => {
                    return Err(RunError {
                        edition,
                        manifest: editions,
                        kind: e.into(),
                    })
                }
            };

            // Publishing. Single call; the sink owns any internal retry.
            let image = match sink.publish(edition, &canvas) {
                Ok(reference) => reference,
                Err(e) => {
                    return Err(RunError {
                        edition,
                        manifest: editions,
                        kind: e.into(),
                    })
                }
            };

            // Recording.
            self.recorder.record(&signature);
            let attributes = build_attributes(&draw);
            editions.push(build_record(edition, attributes, signature, image, Utc::now()));
        }

        Ok(RunManifest {
            run_id: Uuid::new_v4(),
            engine_version: ENGINE_VERSION.to_string(),
            width: self.width,
            height: self.height,
            requested,
            editions,
        })
    }
}
