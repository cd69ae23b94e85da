//! PNG rendering of position sets.
//!
//! Objects are drawn as filled circles of radius `settings.r` with a border
//! ring. Presentation columns (`target`, `fill`, `border`) live in
//! [`Presentation`] and are derived per object only when not given explicitly.
use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{ensure, Context};
use arena_layout::geometry::{Bounds, Limits};
use arena_layout::position::{ObjectId, PositionSet};
use arena_layout::settings::{Rgb, Settings};
use glam::DVec2;
use image::{Rgb as Pixel, RgbImage};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Optional presentation columns for a position set.
#[derive(Debug, Clone, Default)]
pub struct Presentation {
    targets: HashSet<ObjectId>,
    fill: HashMap<ObjectId, Rgb>,
    border: HashMap<ObjectId, Rgb>,
}

impl Presentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the given objects as targets.
    pub fn with_targets(mut self, targets: impl IntoIterator<Item = ObjectId>) -> Self {
        self.targets.extend(targets);
        self
    }

    /// Overrides the fill color of one object.
    pub fn with_fill(mut self, object: ObjectId, color: Rgb) -> Self {
        self.fill.insert(object, color);
        self
    }

    /// Overrides the border color of one object.
    pub fn with_border(mut self, object: ObjectId, color: Rgb) -> Self {
        self.border.insert(object, color);
        self
    }

    /// Resolves one style row per object, in position-set order.
    ///
    /// Objects not marked as targets are distractors. Missing fill/border
    /// colors come from the settings' object or target colors.
    pub fn derive_styles(&self, positions: &PositionSet, settings: &Settings) -> Vec<ObjectStyle> {
        positions
            .iter()
            .map(|p| {
                let target = self.targets.contains(&p.object);
                let (default_fill, default_border) = if target {
                    (settings.fill_target, settings.border_target)
                } else {
                    (settings.fill_object, settings.border_object)
                };
                ObjectStyle {
                    object: p.object,
                    target,
                    fill: self.fill.get(&p.object).copied().unwrap_or(default_fill),
                    border: self.border.get(&p.object).copied().unwrap_or(default_border),
                }
            })
            .collect()
    }
}

/// Fully resolved presentation of one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectStyle {
    pub object: ObjectId,
    pub target: bool,
    pub fill: Rgb,
    pub border: Rgb,
}

/// Image and viewport settings for rendering.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output size in pixels (width, height).
    pub image_size: (u32, u32),
    /// World-space rectangle mapped onto the image.
    pub view: Bounds,
    pub background: Rgb,
    /// Color of the arena frame.
    pub frame_color: Rgb,
    /// Width of each object's border ring in pixels.
    pub border_px: f64,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), view: Bounds) -> Self {
        Self {
            image_size,
            view,
            background: [255, 255, 255],
            frame_color: [0, 0, 0],
            border_px: 2.0,
        }
    }

    /// Viewport covering the arena plus one object radius on every side.
    pub fn for_settings(image_size: (u32, u32), settings: &Settings) -> anyhow::Result<Self> {
        let arena = settings.bounds()?;
        let margin = settings.r.max(0.0);
        let view = Bounds {
            x: Limits::new(arena.x.min - margin, arena.x.max + margin),
            y: Limits::new(arena.y.min - margin, arena.y.max + margin),
        };
        Ok(Self::new(image_size, view))
    }

    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }

    pub fn with_frame_color(mut self, frame_color: Rgb) -> Self {
        self.frame_color = frame_color;
        self
    }

    pub fn with_border_px(mut self, border_px: f64) -> Self {
        self.border_px = border_px;
        self
    }

    fn scale(&self) -> DVec2 {
        let (w, h) = self.image_size;
        DVec2::new(
            w as f64 / self.view.x.width(),
            h as f64 / self.view.y.width(),
        )
    }

    /// World to pixel coordinates; y grows upwards in the world, downwards in the image.
    fn to_pixel(&self, world: DVec2) -> DVec2 {
        let scale = self.scale();
        DVec2::new(
            (world.x - self.view.x.min) * scale.x,
            (self.view.y.max - world.y) * scale.y,
        )
    }
}

/// Renders `positions` into an in-memory image.
pub fn render_positions(
    positions: &PositionSet,
    presentation: &Presentation,
    settings: &Settings,
    rc: &RenderConfig,
) -> anyhow::Result<RgbImage> {
    let (w, h) = rc.image_size;
    ensure!(w > 0 && h > 0, "image size must be non-zero, got {w}x{h}");
    ensure!(
        rc.view.x.is_well_formed()
            && rc.view.y.is_well_formed()
            && rc.view.x.width() > 0.0
            && rc.view.y.width() > 0.0,
        "view must be a non-empty finite rectangle, got {:?}",
        rc.view
    );

    let mut img = RgbImage::from_pixel(w, h, Pixel(rc.background));

    if settings.arena_border {
        let arena = settings.bounds()?;
        for (a, b) in arena.edges() {
            draw_line(&mut img, rc.to_pixel(a), rc.to_pixel(b), rc.frame_color);
        }
    }

    let scale = rc.scale();
    let radius_px = settings.r.max(0.0) * scale.x.min(scale.y);
    for (pos, style) in positions
        .iter()
        .zip(presentation.derive_styles(positions, settings))
    {
        let center = rc.to_pixel(pos.point());
        if !center.is_finite() {
            continue;
        }
        draw_circle(&mut img, center, radius_px, rc.border_px, style);
    }

    Ok(img)
}

/// Renders `positions` and writes the image as PNG.
pub fn render_positions_to_png(
    positions: &PositionSet,
    presentation: &Presentation,
    settings: &Settings,
    rc: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let img = render_positions(positions, presentation, settings, rc)?;
    img.save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!("Wrote {} objects to {}.", positions.len(), path.display());
    Ok(())
}

fn draw_circle(
    img: &mut RgbImage,
    center: DVec2,
    radius: f64,
    border_px: f64,
    style: ObjectStyle,
) {
    let (w, h) = img.dimensions();
    let x0 = (center.x - radius).floor().max(0.0) as u32;
    let y0 = (center.y - radius).floor().max(0.0) as u32;
    let x1 = ((center.x + radius).ceil().max(0.0) as u32).min(w.saturating_sub(1));
    let y1 = ((center.y + radius).ceil().max(0.0) as u32).min(h.saturating_sub(1));
    let inner = (radius - border_px).max(0.0);

    for py in y0..=y1 {
        for px in x0..=x1 {
            let d = DVec2::new(px as f64 + 0.5, py as f64 + 0.5).distance(center);
            if d > radius {
                continue;
            }
            let color = if d > inner { style.border } else { style.fill };
            img.put_pixel(px, py, Pixel(color));
        }
    }
}

fn draw_line(img: &mut RgbImage, a: DVec2, b: DVec2, color: Rgb) {
    let (w, h) = img.dimensions();
    if !a.is_finite() || !b.is_finite() {
        return;
    }
    let Some((a, b)) = clip_segment(a, b, DVec2::new(w as f64, h as f64)) else {
        return;
    };
    let steps = (b - a).abs().max_element().ceil().max(1.0) as u32;
    for i in 0..=steps {
        let p = a.lerp(b, i as f64 / steps as f64);
        // Edges on the far image border land exactly on w/h; keep them visible.
        let px = (p.x.floor() as i64).clamp(0, w as i64 - 1) as u32;
        let py = (p.y.floor() as i64).clamp(0, h as i64 - 1) as u32;
        img.put_pixel(px, py, Pixel(color));
    }
}

/// Liang-Barsky clip of segment `a -> b` against `[0, max.x] x [0, max.y]`.
fn clip_segment(a: DVec2, b: DVec2, max: DVec2) -> Option<(DVec2, DVec2)> {
    let d = b - a;
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [
        (-d.x, a.x),
        (d.x, max.x - a.x),
        (-d.y, a.y),
        (d.y, max.y - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((a + d * t0, a + d * t1))
}
