//! EditionForge Core - Generative Edition Compiler
//!
//! # The Guarantees (Non-Negotiable)
//! 1. No Two Editions Share A Combination
//! 2. Element Order Is Stable, So Dna Is Reproducible
//! 3. Layer Order Is Paint Order
//! 4. Retries Are Bounded, Exhaustion Is Observable
//! 5. Records Exist Only For Published Images

pub mod catalog;
pub mod compose;
pub mod config;
pub mod generate;
pub mod metadata;
pub mod publish;
pub mod select;
pub mod signature;

pub use catalog::{CatalogError, Element, Layer, LayerCatalog};
pub use compose::{CompositionError, Compositor, FsImageLoader, ResourceError, ResourceLoader};
pub use config::{ConfigError, LayerSpec, RunConfig};
pub use generate::{EditionGenerator, GeneratorError, RunError, RunManifest};
pub use metadata::{build_attributes, build_record, Attribute, EditionRecord};
pub use publish::{DirectorySink, PublishError, PublishSink};
pub use select::{pick_index, WeightedSelector};
pub use signature::{signature_of, CombinationRecorder, Draw, DrawPick};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
