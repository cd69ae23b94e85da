#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{
    init_tracing, render_positions, render_positions_to_png, ObjectStyle, Presentation,
    RenderConfig,
};
