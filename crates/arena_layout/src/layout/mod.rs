//! Constrained random layout generation: rejection sampling of object
//! positions under a minimum-separation constraint.
pub mod cancel;
pub mod events;
pub mod generator;
pub mod trial;

pub use cancel::CancelToken;
pub use generator::{
    generate_positions_random, generate_positions_random_with_events, GenerateOptions,
    LayoutGenerator, DEFAULT_MAX_ATTEMPTS,
};
