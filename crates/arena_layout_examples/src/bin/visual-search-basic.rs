use arena_layout::prelude::*;
use arena_layout_examples::{init_tracing, render_positions_to_png, Presentation, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Default arena: 18 x 18 units, objects of radius 0.5, at least 1 unit apart.
    let settings = Settings::builder().min_dist(2.0).build();
    let mut rng = StdRng::seed_from_u64(2025);

    let positions =
        generate_positions_random(8, &settings, &GenerateOptions::default(), &mut rng)?;

    // The first two objects are the targets the observer searches for.
    let presentation = Presentation::new().with_targets([ObjectId(1), ObjectId(2)]);
    let rc = RenderConfig::for_settings((800, 800), &settings)?;
    render_positions_to_png(
        &positions,
        &presentation,
        &settings,
        &rc,
        "visual-search-basic.png",
    )?;

    Ok(())
}
