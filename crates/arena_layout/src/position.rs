//! Position sets: the ordered `(object, x, y)` records produced by the generator.
use std::fmt;

use glam::DVec2;

/// Identifier of an object within a [`PositionSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ObjectId {
    fn from(value: u32) -> Self {
        ObjectId(value)
    }
}

/// A single placed object.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectPosition {
    pub object: ObjectId,
    pub x: f64,
    pub y: f64,
}

impl ObjectPosition {
    pub fn new(object: impl Into<ObjectId>, x: f64, y: f64) -> Self {
        Self {
            object: object.into(),
            x,
            y,
        }
    }

    #[inline]
    pub fn point(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

/// Ordered collection of object positions.
///
/// The type itself does not enforce uniqueness of ids or finiteness of
/// coordinates; use [`crate::validate::is_valid_position`] to check a set
/// built by hand.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionSet {
    objects: Vec<ObjectPosition>,
}

impl PositionSet {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            objects: Vec::with_capacity(cap),
        }
    }

    /// Builds a set from points, assigning dense ids `1..=n` in order.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<DVec2>,
    {
        points
            .into_iter()
            .zip(1u32..)
            .map(|(p, id)| {
                let p = p.into();
                ObjectPosition::new(id, p.x, p.y)
            })
            .collect()
    }

    pub fn push(&mut self, position: ObjectPosition) {
        self.objects.push(position);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ObjectPosition> {
        self.objects.iter()
    }

    pub fn as_slice(&self) -> &[ObjectPosition] {
        &self.objects
    }

    pub fn as_mut_slice(&mut self) -> &mut [ObjectPosition] {
        &mut self.objects
    }

    pub fn into_inner(self) -> Vec<ObjectPosition> {
        self.objects
    }

    pub fn get(&self, object: ObjectId) -> Option<&ObjectPosition> {
        self.objects.iter().find(|p| p.object == object)
    }

    pub fn points(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.objects.iter().map(ObjectPosition::point)
    }
}

impl FromIterator<ObjectPosition> for PositionSet {
    fn from_iter<T: IntoIterator<Item = ObjectPosition>>(iter: T) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<ObjectPosition>> for PositionSet {
    fn from(objects: Vec<ObjectPosition>) -> Self {
        Self { objects }
    }
}

impl IntoIterator for PositionSet {
    type Item = ObjectPosition;
    type IntoIter = std::vec::IntoIter<ObjectPosition>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.into_iter()
    }
}

impl<'a> IntoIterator for &'a PositionSet {
    type Item = &'a ObjectPosition;
    type IntoIter = std::slice::Iter<'a, ObjectPosition>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}
