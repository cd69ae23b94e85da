//! Event types and sinks for observing layout generation.
//!
//! This module defines [`GenerationEvent`] and a set of sinks to emit, collect,
//! or forward events while running
//! [`crate::layout::generator::generate_positions_random_with_events`] or
//! [`crate::layout::generator::LayoutGenerator::generate_with_events`].
use std::time::Duration;

use crate::geometry::Bounds;

/// Discriminant of [`GenerationEvent`], used by sinks to opt out of events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationEventKind {
    Started,
    AttemptRejected,
    Accepted,
    Failed,
}

/// Describes events emitted while generating a layout.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum GenerationEvent {
    /// Emitted once settings and options have been validated.
    Started {
        /// Number of objects to place.
        count: usize,
        /// Rectangle candidates are drawn from, after the border inset.
        sampling_bounds: Bounds,
        /// Separation threshold, if the distance check is enabled.
        min_dist: Option<f64>,
    },

    /// Emitted when a candidate layout failed the separation check.
    AttemptRejected {
        /// 1-based attempt number.
        attempt: usize,
        /// Smallest pairwise distance in the rejected candidate.
        min_observed: Option<f64>,
    },

    /// Emitted when a candidate layout was accepted.
    Accepted {
        /// 1-based attempt number.
        attempt: usize,
        /// Smallest pairwise distance in the accepted layout.
        min_observed: Option<f64>,
        /// Wall time spent in the retry loop.
        elapsed: Duration,
    },

    /// Emitted when generation stopped without a layout.
    Failed {
        /// Attempts made before stopping.
        attempts: usize,
        /// Human-readable reason.
        message: String,
    },
}

impl GenerationEvent {
    pub fn kind(&self) -> GenerationEventKind {
        match self {
            GenerationEvent::Started { .. } => GenerationEventKind::Started,
            GenerationEvent::AttemptRejected { .. } => GenerationEventKind::AttemptRejected,
            GenerationEvent::Accepted { .. } => GenerationEventKind::Accepted,
            GenerationEvent::Failed { .. } => GenerationEventKind::Failed,
        }
    }
}

/// A generic event sink that accepts [`GenerationEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: GenerationEvent);

    /// Whether the sink wants events of `kind`. Lets the generator skip
    /// building payloads nobody reads.
    fn wants(&self, _kind: GenerationEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: GenerationEvent) {}

    #[inline]
    fn wants(&self, _kind: GenerationEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    #[inline]
    fn send(&mut self, event: GenerationEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally filtered by kind.
#[derive(Default)]
pub struct VecSink {
    events: Vec<GenerationEvent>,
    only: Option<Vec<GenerationEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects only events whose kind is listed.
    pub fn only(kinds: impl IntoIterator<Item = GenerationEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<GenerationEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[GenerationEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: GenerationEvent) {
        self.events.push(event);
    }

    fn wants(&self, kind: GenerationEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}
