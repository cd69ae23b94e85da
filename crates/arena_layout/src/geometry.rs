//! Geometry helpers shared by the validator, generator and renderers.
use glam::DVec2;

/// A closed interval `[min, max]` along one axis of the arena.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Limits {
    pub min: f64,
    pub max: f64,
}

impl Limits {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Both ends are finite and `min <= max`.
    pub fn is_well_formed(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    /// Point at fraction `t` of the interval, computed without forming the
    /// width so very wide finite intervals do not overflow.
    #[inline]
    pub fn lerp(&self, t: f64) -> f64 {
        (self.min * (1.0 - t) + self.max * t).clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Shrinks the interval by `inset` on both ends.
    ///
    /// Returns `None` when the inset would leave an empty interval.
    pub fn inset(&self, inset: f64) -> Option<Limits> {
        let shrunk = Limits::new(self.min + inset, self.max - inset);
        (shrunk.min <= shrunk.max).then_some(shrunk)
    }
}

impl From<(f64, f64)> for Limits {
    fn from((min, max): (f64, f64)) -> Self {
        Self::new(min, max)
    }
}

/// Axis-aligned rectangle `xlim × ylim`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: Limits,
    pub y: Limits,
}

impl Bounds {
    pub fn new(x: impl Into<Limits>, y: impl Into<Limits>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    pub fn min(&self) -> DVec2 {
        DVec2::new(self.x.min, self.y.min)
    }

    pub fn max(&self) -> DVec2 {
        DVec2::new(self.x.max, self.y.max)
    }

    pub fn extent(&self) -> DVec2 {
        DVec2::new(self.x.width(), self.y.width())
    }

    pub fn contains(&self, point: DVec2) -> bool {
        self.x.contains(point.x) && self.y.contains(point.y)
    }

    /// Shrinks the rectangle by `inset` on all four sides.
    pub fn inset(&self, inset: f64) -> Option<Bounds> {
        Some(Bounds {
            x: self.x.inset(inset)?,
            y: self.y.inset(inset)?,
        })
    }

    /// Corners in drawing order: bottom-left, bottom-right, top-right, top-left.
    pub fn corners(&self) -> [DVec2; 4] {
        [
            DVec2::new(self.x.min, self.y.min),
            DVec2::new(self.x.max, self.y.min),
            DVec2::new(self.x.max, self.y.max),
            DVec2::new(self.x.min, self.y.max),
        ]
    }

    /// The four frame segments joining consecutive corners.
    pub fn edges(&self) -> [(DVec2, DVec2); 4] {
        let c = self.corners();
        [(c[0], c[1]), (c[1], c[2]), (c[2], c[3]), (c[3], c[0])]
    }
}

/// Standard 2D Euclidean distance.
#[inline]
pub fn euclidean_distance(a: DVec2, b: DVec2) -> f64 {
    a.distance(b)
}
