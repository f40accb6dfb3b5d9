//! Metadata Builder - Provenance Records
//!
//! Converts a draw into its trait-attribute list and assembles the
//! immutable Edition Record once the image has been published.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::signature::Draw;

/// One trait entry: the layer's display name and the selected element's
/// name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: String,
}

/// Persisted result of one successfully composed, uniquely-signatured,
/// published draw. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditionRecord {
    pub edition: usize,
    pub attributes: Vec<Attribute>,
    /// String form of the draw's signature: a reproducible composite key,
    /// not a cryptographic digest. Equal attribute sets yield equal dna.
    pub dna: String,
    pub created_at: DateTime<Utc>,
    pub image: String,
}

/// One attribute per layer, in layer order.
pub fn build_attributes(draw: &Draw) -> Vec<Attribute> {
    draw.picks
        .iter()
        .map(|pick| Attribute {
            trait_type: pick.layer_name.clone(),
            value: pick.element_name.clone(),
        })
        .collect()
}

pub fn build_record(
    edition: usize,
    attributes: Vec<Attribute>,
    dna: String,
    image: String,
    created_at: DateTime<Utc>,
) -> EditionRecord {
    EditionRecord {
        edition,
        attributes,
        dna,
        created_at,
        image,
    }
}
