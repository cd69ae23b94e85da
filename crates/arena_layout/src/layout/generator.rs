//! Rejection-sampling layout generator.
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::geometry::Bounds;
use crate::layout::cancel::CancelToken;
use crate::layout::events::{EventSink, GenerationEvent, GenerationEventKind};
use crate::position::PositionSet;
use crate::sampling::{PositionSampling, UniformRandomSampling};
use crate::settings::Settings;
use crate::validate::{is_distance_at_least, min_pairwise_distance};

/// Attempts made before a layout is declared infeasible.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// Options controlling a single generation run.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Resample until every pair is at least `min_dist` apart.
    pub check_distance: bool,
    /// Inset applied to all four sides of the arena before sampling.
    /// Not applied to the distance check.
    pub border_distance: f64,
    /// Cap on sampling attempts; `None` retries until success.
    pub max_attempts: Option<usize>,
    /// Wall-time budget for the retry loop.
    pub timeout: Option<Duration>,
    /// Checked before every attempt.
    pub cancel: Option<CancelToken>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            check_distance: true,
            border_distance: 0.0,
            max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
            timeout: None,
            cancel: None,
        }
    }
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the separation check is applied.
    pub fn with_check_distance(mut self, check_distance: bool) -> Self {
        self.check_distance = check_distance;
        self
    }

    /// Sets the border inset.
    pub fn with_border_distance(mut self, border_distance: f64) -> Self {
        self.border_distance = border_distance;
        self
    }

    /// Sets the attempt cap.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Removes the attempt cap. An infeasible configuration then only stops
    /// through `timeout` or `cancel`, or never.
    pub fn unbounded(mut self) -> Self {
        self.max_attempts = None;
        self
    }

    /// Sets the wall-time budget.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the cancellation token.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Validates the options, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.border_distance.is_nan() || self.border_distance < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "border_distance must be a non-negative number, got {}",
                self.border_distance
            )));
        }
        if self.max_attempts == Some(0) {
            return Err(Error::InvalidConfig("max_attempts must be > 0".into()));
        }
        Ok(())
    }
}

/// Generates `n` uniformly distributed objects inside the arena of `settings`.
///
/// With `options.check_distance`, whole candidate layouts are redrawn until
/// every pair of objects is at least `settings.min_dist` apart. Settings and
/// options are validated before any sampling; `n == 0` returns an empty set
/// without touching the RNG.
pub fn generate_positions_random<R: Rng>(
    n: usize,
    settings: &Settings,
    options: &GenerateOptions,
    rng: &mut R,
) -> Result<PositionSet> {
    generate_positions_random_with_events(n, settings, options, rng, &mut ())
}

pub fn generate_positions_random_with_events<R: Rng>(
    n: usize,
    settings: &Settings,
    options: &GenerateOptions,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<PositionSet> {
    let sampling_bounds = resolve_sampling_bounds(n, settings, options)?;
    let min_dist = options.check_distance.then_some(settings.min_dist);

    if sink.wants(GenerationEventKind::Started) {
        sink.send(GenerationEvent::Started {
            count: n,
            sampling_bounds,
            min_dist,
        });
    }

    if n == 0 {
        return Ok(PositionSet::new());
    }

    let sampling = UniformRandomSampling::new(n);
    let started = Instant::now();
    let mut attempts = 0usize;

    loop {
        if let Some(err) = stop_reason(options, attempts, started, settings.min_dist) {
            warn!("Layout generation for {} objects stopped: {}.", n, err);
            if sink.wants(GenerationEventKind::Failed) {
                sink.send(GenerationEvent::Failed {
                    attempts,
                    message: err.to_string(),
                });
            }
            return Err(err);
        }
        attempts += 1;

        let candidate = PositionSet::from_points(sampling.generate(&sampling_bounds, rng));

        let accepted = match min_dist {
            Some(d) => is_distance_at_least(&candidate, d),
            None => true,
        };

        if accepted {
            debug!(
                "Accepted layout of {} objects after {} attempt(s).",
                n, attempts
            );
            if sink.wants(GenerationEventKind::Accepted) {
                sink.send(GenerationEvent::Accepted {
                    attempt: attempts,
                    min_observed: min_pairwise_distance(&candidate),
                    elapsed: started.elapsed(),
                });
            }
            return Ok(candidate);
        }

        if sink.wants(GenerationEventKind::AttemptRejected) {
            sink.send(GenerationEvent::AttemptRejected {
                attempt: attempts,
                min_observed: min_pairwise_distance(&candidate),
            });
        }
    }
}

fn resolve_sampling_bounds(
    n: usize,
    settings: &Settings,
    options: &GenerateOptions,
) -> Result<Bounds> {
    let bounds = settings.bounds()?;
    options.validate()?;
    if options.check_distance {
        settings.validate()?;
    }
    if u32::try_from(n).is_err() {
        return Err(Error::InvalidConfig(format!(
            "cannot place {n} objects, ids are 32-bit"
        )));
    }
    bounds.inset(options.border_distance).ok_or_else(|| {
        Error::InvalidConfig(format!(
            "border_distance {} leaves no room inside arena {:?} x {:?}",
            options.border_distance, bounds.x, bounds.y
        ))
    })
}

fn stop_reason(
    options: &GenerateOptions,
    attempts: usize,
    started: Instant,
    min_dist: f64,
) -> Option<Error> {
    if options.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
        return Some(Error::Cancelled { attempts });
    }
    if options.max_attempts.is_some_and(|max| attempts >= max) {
        return Some(Error::Infeasible { attempts, min_dist });
    }
    if let Some(timeout) = options.timeout {
        let elapsed = started.elapsed();
        if elapsed >= timeout {
            return Some(Error::Timeout { attempts, elapsed });
        }
    }
    None
}

/// Generator bound to a validated settings record and options.
#[derive(Debug, Clone)]
pub struct LayoutGenerator {
    /// Settings supplying the arena and separation threshold.
    pub settings: Settings,
    /// Options applied to every run.
    pub options: GenerateOptions,
}

impl LayoutGenerator {
    pub fn try_new(settings: Settings, options: GenerateOptions) -> Result<Self> {
        resolve_sampling_bounds(0, &settings, &options)?;
        Ok(Self { settings, options })
    }

    /// Generates a layout of `n` objects.
    pub fn generate(&self, n: usize, rng: &mut impl Rng) -> Result<PositionSet> {
        generate_positions_random(n, &self.settings, &self.options, rng)
    }

    pub fn generate_with_events(
        &self,
        n: usize,
        rng: &mut impl Rng,
        sink: &mut dyn EventSink,
    ) -> Result<PositionSet> {
        generate_positions_random_with_events(n, &self.settings, &self.options, rng, sink)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::convert::Infallible;

    use rand::rngs::StdRng;
    use rand::{SeedableRng, TryRng};

    use super::*;
    use crate::layout::events::VecSink;
    use crate::sampling::tests::FixedRng;
    use crate::settings::SettingsBuilder;
    use crate::validate::is_valid_position;

    fn settings() -> Settings {
        Settings::builder().square(-10.0, 10.0).min_dist(1.0).build()
    }

    struct CountingRng {
        inner: StdRng,
        calls: usize,
    }

    impl TryRng for CountingRng {
        type Error = Infallible;

        fn try_next_u32(&mut self) -> std::result::Result<u32, Infallible> {
            self.calls += 1;
            Ok(self.inner.next_u32())
        }

        fn try_next_u64(&mut self) -> std::result::Result<u64, Infallible> {
            self.calls += 1;
            Ok(self.inner.next_u64())
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), Infallible> {
            self.calls += 1;
            self.inner.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn zero_objects_yield_valid_empty_set_without_sampling() {
        let mut rng = CountingRng {
            inner: StdRng::seed_from_u64(1),
            calls: 0,
        };
        let set = generate_positions_random(0, &settings(), &GenerateOptions::default(), &mut rng)
            .expect("empty layout");
        assert!(set.is_empty());
        assert!(is_valid_position(&set));
        assert_eq!(rng.calls, 0);
    }

    #[test]
    fn generated_layouts_are_valid_and_separated() {
        let mut rng = StdRng::seed_from_u64(7);
        let s = settings();
        for n in [1, 2, 5, 12] {
            let set = generate_positions_random(n, &s, &GenerateOptions::default(), &mut rng)
                .expect("feasible layout");
            assert_eq!(set.len(), n);
            assert!(is_valid_position(&set));
            assert!(is_distance_at_least(&set, s.min_dist));

            let ids: HashSet<_> = set.iter().map(|p| p.object).collect();
            assert_eq!(ids.len(), n);
        }
    }

    #[test]
    fn border_distance_shrinks_sampling_area() {
        let mut rng = StdRng::seed_from_u64(11);
        let options = GenerateOptions::default().with_border_distance(3.0);
        for _ in 0..20 {
            let set = generate_positions_random(5, &settings(), &options, &mut rng)
                .expect("feasible layout");
            for p in &set {
                assert!((-7.0..=7.0).contains(&p.x), "x = {}", p.x);
                assert!((-7.0..=7.0).contains(&p.y), "y = {}", p.y);
            }
        }
    }

    #[test]
    fn missing_limits_fail_before_sampling() {
        let s = SettingsBuilder::empty().ylim(-1.0, 1.0).build();
        let mut rng = CountingRng {
            inner: StdRng::seed_from_u64(1),
            calls: 0,
        };
        let err = generate_positions_random(4, &s, &GenerateOptions::default(), &mut rng)
            .expect_err("xlim missing");
        assert!(matches!(err, Error::InvalidConfig(ref msg) if msg.contains("xlim")));
        assert_eq!(rng.calls, 0);
    }

    #[test]
    fn missing_limits_fail_even_for_zero_objects() {
        let s = SettingsBuilder::empty().build();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_positions_random(0, &s, &GenerateOptions::default(), &mut rng).is_err());
    }

    #[test]
    fn invalid_options_are_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let s = settings();

        let negative = GenerateOptions::default().with_border_distance(-1.0);
        assert!(generate_positions_random(3, &s, &negative, &mut rng).is_err());

        let too_wide = GenerateOptions::default().with_border_distance(10.5);
        assert!(generate_positions_random(3, &s, &too_wide, &mut rng).is_err());

        let zero_attempts = GenerateOptions::default().with_max_attempts(0);
        assert!(generate_positions_random(3, &s, &zero_attempts, &mut rng).is_err());
    }

    #[test]
    fn negative_min_dist_only_matters_when_checked() {
        let s = Settings::builder().min_dist(-2.0).build();
        let mut rng = StdRng::seed_from_u64(5);

        assert!(generate_positions_random(3, &s, &GenerateOptions::default(), &mut rng).is_err());

        let unchecked = GenerateOptions::default().with_check_distance(false);
        let set = generate_positions_random(3, &s, &unchecked, &mut rng).expect("unchecked draw");
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn unchecked_draw_is_accepted_even_if_overlapping() {
        // A constant RNG stacks every object on the lower-left corner.
        let mut rng = FixedRng { value: 0 };
        let options = GenerateOptions::default().with_check_distance(false);
        let set = generate_positions_random(3, &settings(), &options, &mut rng)
            .expect("first draw accepted");
        assert_eq!(set.len(), 3);
        assert!(set.iter().all(|p| p.x == -10.0 && p.y == -10.0));
        assert!(!is_distance_at_least(&set, 1.0));
    }

    #[test]
    fn infeasible_configuration_reports_after_attempt_cap() {
        let s = Settings::builder().square(0.0, 1.0).min_dist(5.0).build();
        let options = GenerateOptions::default().with_max_attempts(25);
        let mut rng = StdRng::seed_from_u64(3);
        let mut sink = VecSink::new();

        let err = generate_positions_random_with_events(2, &s, &options, &mut rng, &mut sink)
            .expect_err("cannot fit two objects 5 apart in a unit square");
        assert!(matches!(err, Error::Infeasible { attempts: 25, .. }));

        let events = sink.into_inner();
        let rejected = events
            .iter()
            .filter(|e| matches!(e, GenerationEvent::AttemptRejected { .. }))
            .count();
        assert_eq!(rejected, 25);
        assert!(matches!(
            events.last(),
            Some(GenerationEvent::Failed { attempts: 25, .. })
        ));
    }

    #[test]
    fn extreme_arena_is_sampled_not_collapsed_onto_a_corner() {
        let s = Settings::builder().square(-1e308, 1e308).build();
        let options = GenerateOptions::default().with_max_attempts(50);
        let mut rng = StdRng::seed_from_u64(21);
        let set = generate_positions_random(4, &s, &options, &mut rng).expect("huge arena");
        assert!(is_valid_position(&set));
        assert!(is_distance_at_least(&set, 1.0));
        let corners = set.iter().filter(|p| p.x == 1e308 && p.y == 1e308).count();
        assert_eq!(corners, 0);
    }

    #[test]
    fn cancelled_token_stops_before_first_attempt() {
        let token = CancelToken::new();
        token.cancel();
        let s = Settings::builder().square(0.0, 1.0).min_dist(5.0).build();
        let options = GenerateOptions::default().unbounded().with_cancel_token(token);
        let mut rng = StdRng::seed_from_u64(3);
        let err = generate_positions_random(2, &s, &options, &mut rng).expect_err("cancelled");
        assert!(matches!(err, Error::Cancelled { attempts: 0 }));
    }

    #[test]
    fn zero_timeout_stops_unbounded_loop() {
        let s = Settings::builder().square(0.0, 1.0).min_dist(5.0).build();
        let options = GenerateOptions::default()
            .unbounded()
            .with_timeout(Duration::ZERO);
        let mut rng = StdRng::seed_from_u64(3);
        let err = generate_positions_random(2, &s, &options, &mut rng).expect_err("timed out");
        assert!(matches!(err, Error::Timeout { .. }));
    }

    #[test]
    fn events_report_start_and_acceptance() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut sink = VecSink::new();
        let options = GenerateOptions::default().with_border_distance(1.0);
        generate_positions_random_with_events(4, &settings(), &options, &mut rng, &mut sink)
            .expect("feasible layout");

        let events = sink.into_inner();
        match events.first() {
            Some(GenerationEvent::Started {
                count,
                sampling_bounds,
                min_dist,
            }) => {
                assert_eq!(*count, 4);
                assert_eq!(*sampling_bounds, Bounds::new((-9.0, 9.0), (-9.0, 9.0)));
                assert_eq!(*min_dist, Some(1.0));
            }
            other => panic!("expected Started, got {other:?}"),
        }
        match events.last() {
            Some(GenerationEvent::Accepted {
                attempt,
                min_observed,
                ..
            }) => {
                assert_eq!(*attempt, events.len() - 1);
                assert!(min_observed.expect("four objects") >= 1.0);
            }
            other => panic!("expected Accepted, got {other:?}"),
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let s = settings();
        let options = GenerateOptions::default();
        let a = generate_positions_random(10, &s, &options, &mut StdRng::seed_from_u64(99))
            .expect("layout a");
        let b = generate_positions_random(10, &s, &options, &mut StdRng::seed_from_u64(99))
            .expect("layout b");
        assert_eq!(a, b);
    }

    #[test]
    fn layout_generator_validates_up_front() {
        let missing = LayoutGenerator::try_new(
            SettingsBuilder::empty().build(),
            GenerateOptions::default(),
        );
        assert!(missing.is_err());

        let generator = LayoutGenerator::try_new(settings(), GenerateOptions::default())
            .expect("valid settings");
        let mut rng = StdRng::seed_from_u64(4);
        let set = generator.generate(6, &mut rng).expect("feasible layout");
        assert_eq!(set.len(), 6);
    }
}
