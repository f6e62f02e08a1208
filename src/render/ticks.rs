pub(crate) const GRID_TARGET_SPACING_PX: f64 = 96.0;
const GRID_MIN_TICKS: usize = 2;
const GRID_MAX_TICKS: usize = 16;

pub(crate) fn grid_tick_target_count(axis_span_px: f64, target_spacing_px: f64) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return GRID_MIN_TICKS;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return GRID_MIN_TICKS;
    }

    let raw = (axis_span_px / target_spacing_px).floor() as usize + 1;
    raw.clamp(GRID_MIN_TICKS, GRID_MAX_TICKS)
}

/// Rounds a raw step to 1, 2, 5 or 10 times a power of ten.
pub(crate) fn nice_step(raw_step: f64) -> f64 {
    if !raw_step.is_finite() || raw_step <= 0.0 {
        return 1.0;
    }

    let magnitude = 10.0_f64.powf(raw_step.log10().floor());
    if !magnitude.is_finite() || magnitude <= 0.0 {
        return raw_step;
    }

    let normalized = raw_step / magnitude;
    let nice = if normalized < 1.5 {
        1.0
    } else if normalized < 3.0 {
        2.0
    } else if normalized < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Multiples of `step` inside `[min, max]`.
pub(crate) fn ticks_in_range(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite() && step.is_finite()) || step <= 0.0 || max < min {
        return Vec::new();
    }

    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Decimal places needed to print multiples of `step` without noise.
pub(crate) fn precision_for_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return 0;
    }
    (-step.log10().floor()) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_step_snaps_to_one_two_five() {
        assert_eq!(nice_step(0.9), 1.0);
        assert_eq!(nice_step(2.4), 2.0);
        assert_eq!(nice_step(4.0), 5.0);
        assert_eq!(nice_step(8.0), 10.0);
        assert_eq!(nice_step(-3.0), 1.0);
    }

    #[test]
    fn ticks_cover_range_on_step_multiples() {
        assert_eq!(ticks_in_range(-1.2, 3.9, 1.0), vec![-1.0, 0.0, 1.0, 2.0, 3.0]);
        assert!(ticks_in_range(3.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn tick_count_is_clamped() {
        assert_eq!(grid_tick_target_count(0.0, 96.0), 2);
        assert_eq!(grid_tick_target_count(10_000.0, 96.0), 16);
        assert_eq!(grid_tick_target_count(500.0, 96.0), 6);
    }

    #[test]
    fn precision_follows_step_magnitude() {
        assert_eq!(precision_for_step(5.0), 0);
        assert_eq!(precision_for_step(0.5), 1);
        assert_eq!(precision_for_step(0.02), 2);
    }
}
