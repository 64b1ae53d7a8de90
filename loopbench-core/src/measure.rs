//! Timing
//!
//! Wall-clock measurement on the monotonic clock, plus the per-variant
//! sampling loop: run the variant `samples` times, keep every duration,
//! summarize the last output.

use crate::case::Variant;
use crate::error::VariantError;
use crate::output::Output;
use crate::result::VariantResult;
use crate::runner::RunSettings;
use std::time::{Duration, Instant};

/// Monotonic stopwatch for a single variant execution
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time since start
    #[inline(always)]
    pub fn stop(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Time a variant against a fixture
///
/// Each repetition is one sample. The first failing repetition ends the
/// measurement; so does the first sample over the timeout budget, which is
/// reported but never interrupted.
pub fn measure_variant<TIn, TOut>(
    variant: &Variant<TIn, TOut>,
    fixture: &[TIn],
    settings: &RunSettings,
) -> VariantResult
where
    TOut: Output,
{
    let target_samples = settings.samples.max(1);
    let mut samples = Vec::with_capacity(target_samples);
    let mut last_output: Option<TOut> = None;

    for _ in 0..target_samples {
        let timer = Timer::start();
        let outcome = variant.invoke(std::hint::black_box(fixture));
        let elapsed = timer.stop();

        let output = match outcome {
            Ok(output) => output,
            Err(error) => {
                return VariantResult::failed(variant.name(), variant.strategy(), samples, error);
            }
        };
        samples.push(elapsed);

        if let Some(budget) = settings.timeout {
            if elapsed > budget {
                return VariantResult::failed(
                    variant.name(),
                    variant.strategy(),
                    samples,
                    VariantError::Timeout { budget, elapsed },
                );
            }
        }

        // Previous output is dropped here, outside the timed region
        last_output = Some(std::hint::black_box(output));
    }

    match last_output {
        Some(output) => {
            VariantResult::succeeded(variant.name(), variant.strategy(), samples, output.summarize())
        }
        None => VariantResult::failed(
            variant.name(),
            variant.strategy(),
            samples,
            VariantError::execution("variant produced no samples"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::Strategy;

    fn settings(samples: usize, timeout: Option<Duration>) -> RunSettings {
        RunSettings { samples, timeout }
    }

    #[test]
    fn test_timer() {
        let timer = Timer::start();
        std::thread::sleep(Duration::from_millis(10));
        let elapsed = timer.stop();

        assert!(elapsed >= Duration::from_millis(5));
    }

    #[test]
    fn test_collects_one_sample_per_repetition() {
        let variant: Variant<i64, Vec<i64>> = Variant::new("copy", Strategy::Custom, |xs| {
            Ok(xs.to_vec())
        });
        let result = measure_variant(&variant, &[1, 2, 3][..], &settings(5, None));

        assert_eq!(result.samples.len(), 5);
        assert_eq!(result.output().map(|o| o.elements), Some(3));
    }

    #[test]
    fn test_zero_samples_still_runs_once() {
        let variant: Variant<i64, i64> =
            Variant::new("sum", Strategy::Custom, |xs| Ok(xs.iter().sum()));
        let result = measure_variant(&variant, &[4, 5][..], &settings(0, None));

        assert_eq!(result.samples.len(), 1);
        assert_eq!(result.output().map(|o| o.preview.as_str()), Some("9"));
    }

    #[test]
    fn test_failure_stops_sampling() {
        let variant: Variant<i64, i64> = Variant::new("fail", Strategy::Custom, |_| {
            Err(VariantError::execution("bad input"))
        });
        let result = measure_variant(&variant, &[1][..], &settings(10, None));

        assert!(result.samples.is_empty());
        assert_eq!(result.error(), Some(&VariantError::execution("bad input")));
    }

    #[test]
    fn test_timeout_is_reported_not_enforced() {
        let variant: Variant<i64, i64> = Variant::new("slow", Strategy::Custom, |xs| {
            std::thread::sleep(Duration::from_millis(5));
            Ok(xs.len() as i64)
        });
        let result = measure_variant(
            &variant,
            &[1, 2][..],
            &settings(3, Some(Duration::from_micros(1))),
        );

        // The slow sample completed and was recorded before the budget check
        assert_eq!(result.samples.len(), 1);
        assert!(matches!(result.error(), Some(VariantError::Timeout { .. })));
    }

    #[test]
    fn test_budget_applies_to_each_sample_not_the_total() {
        let variant: Variant<i64, i64> = Variant::new("steady", Strategy::Custom, |xs| {
            std::thread::sleep(Duration::from_millis(20));
            Ok(xs.len() as i64)
        });
        let result = measure_variant(
            &variant,
            &[1][..],
            &settings(4, Some(Duration::from_millis(60))),
        );

        let total: Duration = result.samples.iter().sum();
        assert_eq!(result.samples.len(), 4);
        assert!(total > Duration::from_millis(60));
        assert!(result.is_success());
    }
}
