use arena_layout::prelude::*;
use arena_layout_examples::{init_tracing, render_positions_to_png, Presentation, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let base_seed = 7u64;
    let settings = Settings::builder()
        .square(-8.0, 8.0)
        .min_dist(1.5)
        .radius(0.6)
        .fill_target([220, 60, 60])
        .build();
    let generator = LayoutGenerator::try_new(
        settings.clone(),
        GenerateOptions::default().with_border_distance(1.0),
    )?;
    let rc = RenderConfig::for_settings((600, 600), &settings)?;

    for trial in 0..4u64 {
        // Count rejected draws so tight configurations show up in the log.
        let mut rejected = 0usize;
        let mut sink = FnSink::new(|event| {
            if let GenerationEvent::AttemptRejected { .. } = event {
                rejected += 1;
            }
        });

        let mut rng = StdRng::seed_from_u64(seed_for_trial(base_seed, trial));
        let positions = generator.generate_with_events(10, &mut rng, &mut sink)?;
        info!("Trial {}: {} rejected draw(s).", trial, rejected);

        let presentation = Presentation::new().with_targets([ObjectId(1)]);
        let out = format!("trial-block-{trial}.png");
        render_positions_to_png(&positions, &presentation, &settings, &rc, out)?;
    }

    Ok(())
}
