//! Degree-indexed trig lookup table, used by the rotation and quaternion
//! builders instead of calling `sin`/`cos` per triangle.

use std::sync::LazyLock;

/// One entry per whole degree, plus a duplicate of 0° at index 360 so the
/// interpolation step never reads past the end.
static SINE_TABLE: LazyLock<[f32; 361]> = LazyLock::new(|| {
    let mut table = [0.0_f32; 361];
    for (deg, entry) in table.iter_mut().enumerate() {
        *entry = (deg as f32).to_radians().sin();
    }
    table
});

/// Sine of an angle in degrees, linearly interpolated from the table.
/// Any input is accepted; it is reduced modulo 360 first.
pub fn lookup_sine(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);

    let lower = wrapped.floor();
    let frac = wrapped - lower;
    let i = lower as usize;

    let a = SINE_TABLE[i];
    let b = SINE_TABLE[i + 1];

    a + frac * (b - a)
}

/// Cosine of an angle in degrees, via the 90° phase shift.
pub fn lookup_cosine(degrees: f32) -> f32 {
    lookup_sine(degrees + 90.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_accuracy() {
        // Sweep well past one full turn in both directions.
        let mut deg = -720.0_f32;
        while deg < 720.0 {
            let err = (lookup_sine(deg) - deg.to_radians().sin()).abs();
            assert!(err <= 1e-3, "sine error {err} at {deg} degrees");

            let err = (lookup_cosine(deg) - deg.to_radians().cos()).abs();
            assert!(err <= 1e-3, "cosine error {err} at {deg} degrees");

            deg += 0.37;
        }
    }

    #[test]
    fn exact_cardinal_angles() {
        assert_eq!(lookup_sine(0.0), 0.0);
        assert!((lookup_sine(90.0) - 1.0).abs() < 1e-6);
        assert!((lookup_cosine(0.0) - 1.0).abs() < 1e-6);
        assert!(lookup_cosine(90.0).abs() < 1e-6);
        assert!((lookup_sine(-90.0) + 1.0).abs() < 1e-6);
    }
}
