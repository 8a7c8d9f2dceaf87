//! # Rule extractors (§4.2)
//!
//! Pure functions over cleaned claim text. None of these hold state or
//! depend on the backend; every compiled pattern lives in a `once_cell`
//! static, built once and shared read-only (§5).

mod chemical_entity;
mod claim_number;
mod dependency;
mod markush;
mod numerical_range;
mod preamble;
mod preprocess;
mod transitional;

pub use chemical_entity::find_chemical_entities;
pub use claim_number::extract_claim_number;
pub use dependency::{extract_dependency_refs, DependencyMatch};
pub use markush::extract_markush_groups;
pub use numerical_range::extract_numerical_ranges;
pub use preamble::split_preamble_body;
pub use preprocess::preprocess;
pub use transitional::{detect_transitional_phrase, TransitionalMatch};
