#![forbid(unsafe_code)]
//! arena_layout: constrained random layouts of circular objects in a bounded arena.
//!
//! Modules:
//! - position: position sets of `(object, x, y)` records
//! - validate: structural validity and minimum-separation predicates
//! - layout: rejection-sampling generator, events, cancellation, per-trial seeding
//! - sampling: candidate draws (uniform random)
//! - settings: arena and presentation settings with a default-then-override builder
//! - geometry: limits, bounds and the Euclidean distance helper
pub mod error;
pub mod geometry;
pub mod layout;
pub mod position;
pub mod sampling;
pub mod settings;
pub mod validate;

/// Convenient re-exports for common types. Import with `use arena_layout::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{euclidean_distance, Bounds, Limits};
    pub use crate::layout::events::{
        EventSink, FnSink, GenerationEvent, GenerationEventKind, VecSink,
    };
    pub use crate::layout::trial::{generate_trial, generate_trials, seed_for_trial};
    pub use crate::layout::{
        generate_positions_random, generate_positions_random_with_events, CancelToken,
        GenerateOptions, LayoutGenerator,
    };
    pub use crate::position::{ObjectId, ObjectPosition, PositionSet};
    pub use crate::sampling::{PositionSampling, UniformRandomSampling};
    pub use crate::settings::{Rgb, Settings, SettingsBuilder};
    pub use crate::validate::{
        find_duplicate_ids, is_distance_at_least, is_valid_position, min_pairwise_distance,
    };
}
