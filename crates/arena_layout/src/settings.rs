//! Settings record consumed by the generator and by renderers.
//!
//! A [`Settings`] value is immutable once built. New records are derived with
//! [`SettingsBuilder`], starting either from the defaults, from a parent record,
//! or from an empty record without arena limits.
use crate::error::{Error, Result};
use crate::geometry::{Bounds, Limits};

/// RGB color used by renderers.
pub type Rgb = [u8; 3];

pub const DEFAULT_LIMITS: (f64, f64) = (-9.0, 9.0);
pub const DEFAULT_MIN_DIST: f64 = 1.0;
pub const DEFAULT_RADIUS: f64 = 0.5;
pub const GRAY: Rgb = [190, 190, 190];
pub const GREEN: Rgb = [0, 255, 0];
pub const BLACK: Rgb = [0, 0, 0];

/// Arena and presentation settings.
///
/// `xlim`, `ylim` and `min_dist` are read by the generator. The remaining
/// fields are only read by renderers and are not validated here.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settings {
    /// Horizontal arena limits. Required for generation.
    #[cfg_attr(feature = "serde", serde(default))]
    pub xlim: Option<Limits>,
    /// Vertical arena limits. Required for generation.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ylim: Option<Limits>,
    /// Minimum distance between object centers.
    #[cfg_attr(feature = "serde", serde(default = "serde_defaults::min_dist"))]
    pub min_dist: f64,
    /// Object radius.
    #[cfg_attr(feature = "serde", serde(default = "serde_defaults::radius"))]
    pub r: f64,
    /// Whether renderers draw the arena frame.
    #[cfg_attr(feature = "serde", serde(default = "serde_defaults::arena_border"))]
    pub arena_border: bool,
    #[cfg_attr(feature = "serde", serde(default = "serde_defaults::fill_object"))]
    pub fill_object: Rgb,
    #[cfg_attr(feature = "serde", serde(default = "serde_defaults::fill_target"))]
    pub fill_target: Rgb,
    #[cfg_attr(feature = "serde", serde(default = "serde_defaults::border"))]
    pub border_object: Rgb,
    #[cfg_attr(feature = "serde", serde(default = "serde_defaults::border"))]
    pub border_target: Rgb,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            xlim: Some(DEFAULT_LIMITS.into()),
            ylim: Some(DEFAULT_LIMITS.into()),
            min_dist: DEFAULT_MIN_DIST,
            r: DEFAULT_RADIUS,
            arena_border: true,
            fill_object: GRAY,
            fill_target: GREEN,
            border_object: BLACK,
            border_target: BLACK,
        }
    }
}

impl Settings {
    /// Builder starting from the default record.
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::from_parent(&Settings::default())
    }

    /// Builder inheriting every key from `parent`.
    pub fn builder_from(parent: &Settings) -> SettingsBuilder {
        SettingsBuilder::from_parent(parent)
    }

    /// Resolves the arena rectangle, failing if either limit is missing or malformed.
    pub fn bounds(&self) -> Result<Bounds> {
        let x = require_limits("xlim", self.xlim)?;
        let y = require_limits("ylim", self.ylim)?;
        Ok(Bounds { x, y })
    }

    /// Validates the keys consumed by the generator.
    pub fn validate(&self) -> Result<()> {
        self.bounds()?;
        if self.min_dist.is_nan() || self.min_dist < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "min_dist must be a non-negative number, got {}",
                self.min_dist
            )));
        }
        Ok(())
    }
}

fn require_limits(name: &str, limits: Option<Limits>) -> Result<Limits> {
    let limits =
        limits.ok_or_else(|| Error::InvalidConfig(format!("missing required setting '{name}'")))?;
    if !limits.is_well_formed() {
        return Err(Error::InvalidConfig(format!(
            "{name} must be finite with min <= max, got ({}, {})",
            limits.min, limits.max
        )));
    }
    Ok(limits)
}

/// Builder producing an immutable [`Settings`] record.
///
/// Start from [`Settings::builder`] (defaults), [`Settings::builder_from`]
/// (a parent record) or [`SettingsBuilder::empty`], then apply overrides.
#[derive(Debug, Clone)]
pub struct SettingsBuilder {
    settings: Settings,
}

impl SettingsBuilder {
    /// Defaults without arena limits.
    pub fn empty() -> Self {
        Self {
            settings: Settings {
                xlim: None,
                ylim: None,
                ..Settings::default()
            },
        }
    }

    fn from_parent(parent: &Settings) -> Self {
        Self {
            settings: parent.clone(),
        }
    }

    pub fn xlim(mut self, min: f64, max: f64) -> Self {
        self.settings.xlim = Some(Limits::new(min, max));
        self
    }

    pub fn ylim(mut self, min: f64, max: f64) -> Self {
        self.settings.ylim = Some(Limits::new(min, max));
        self
    }

    /// Sets both limits to the same interval.
    pub fn square(self, min: f64, max: f64) -> Self {
        self.xlim(min, max).ylim(min, max)
    }

    pub fn min_dist(mut self, min_dist: f64) -> Self {
        self.settings.min_dist = min_dist;
        self
    }

    pub fn radius(mut self, r: f64) -> Self {
        self.settings.r = r;
        self
    }

    pub fn arena_border(mut self, arena_border: bool) -> Self {
        self.settings.arena_border = arena_border;
        self
    }

    pub fn fill_object(mut self, color: Rgb) -> Self {
        self.settings.fill_object = color;
        self
    }

    pub fn fill_target(mut self, color: Rgb) -> Self {
        self.settings.fill_target = color;
        self
    }

    pub fn border_object(mut self, color: Rgb) -> Self {
        self.settings.border_object = color;
        self
    }

    pub fn border_target(mut self, color: Rgb) -> Self {
        self.settings.border_target = color;
        self
    }

    pub fn build(self) -> Settings {
        self.settings
    }
}

#[cfg(feature = "serde")]
mod serde_defaults {
    use super::*;

    pub fn min_dist() -> f64 {
        DEFAULT_MIN_DIST
    }

    pub fn radius() -> f64 {
        DEFAULT_RADIUS
    }

    pub fn arena_border() -> bool {
        true
    }

    pub fn fill_object() -> Rgb {
        GRAY
    }

    pub fn fill_target() -> Rgb {
        GREEN
    }

    pub fn border() -> Rgb {
        BLACK
    }
}
