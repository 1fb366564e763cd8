//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Map a value from one range into another.
pub fn lin_map<T>(source_range: (T, T), target_range: (T, T), value: T) -> T
where
    T: Float,
{
    target_range.0
        + ((value - source_range.0) * (target_range.1 - target_range.0)
            / (source_range.1 - source_range.0))
}

/// Smoothstep easing of a unit progress value.
///
/// Monotonic on `[0, 1]`, with `smoothstep(0) == 0`, `smoothstep(1) == 1`
/// and a zero first derivative at both ends.
pub fn smoothstep<T>(t: T) -> T
where
    T: Float,
{
    let two = T::from(2).unwrap();
    let three = T::from(3).unwrap();

    t * t * (three - two * t)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lin_map() {
        assert_eq!(lin_map((0f64, 1f64), (0f64, 20f64), 0.5f64), 10f64);
        assert_eq!(lin_map((0f64, 1f64), (5f64, 15f64), 0f64), 5f64);
        assert_eq!(lin_map((-1f64, 1f64), (0f64, 1f64), 0f64), 0.5f64);
    }

    #[test]
    fn test_smoothstep() {
        assert_eq!(smoothstep(0f64), 0f64);
        assert_eq!(smoothstep(1f64), 1f64);
        assert_eq!(smoothstep(0.5f64), 0.5f64);

        // Monotonic over the unit interval
        let mut prev = 0f64;
        for i in 1..=100 {
            let s = smoothstep(i as f64 / 100f64);
            assert!(s >= prev);
            prev = s;
        }
    }
}
