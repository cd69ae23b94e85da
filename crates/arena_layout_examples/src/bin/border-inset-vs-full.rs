use arena_layout::prelude::*;
use arena_layout_examples::{init_tracing, render_positions_to_png, Presentation, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let settings = Settings::builder().square(-10.0, 10.0).min_dist(1.5).build();
    let rc = RenderConfig::for_settings((800, 800), &settings)?.with_background([240, 240, 235]);

    // Same seed for both runs so only the inset differs.
    for (border_distance, out) in [
        (0.0, "border-inset-none.png"),
        (3.0, "border-inset-3.png"),
    ] {
        let options = GenerateOptions::default().with_border_distance(border_distance);
        let mut rng = StdRng::seed_from_u64(42);
        let positions = generate_positions_random(12, &settings, &options, &mut rng)?;
        render_positions_to_png(&positions, &Presentation::new(), &settings, &rc, out)?;
    }

    Ok(())
}
