use crate::types::{Position, UnitScale};

/// Average absolute offset component above which a file is assumed to be in centimeters.
/// BVH files in centimeters have offsets in the tens; in meters they stay below 2.
const CM_LIKE_THRESHOLD: f64 = 2.0;

/// Frames per second for an inter-frame duration in seconds, rounded to the nearest integer.
/// Yields `None` unless the rounded rate is a positive `u32`.
pub(crate) fn __fps_from_frame_time(frame_time: f64) -> Option<u32> {
    if frame_time.is_nan() || frame_time <= 0.0 {
        return None;
    }
    let fps = (1.0 / frame_time).round();
    if fps >= 1.0 && fps <= u32::MAX as f64 {
        Some(fps as u32)
    } else {
        None
    }
}

/// Guess the length unit from the magnitude of local offsets.
/// Offsets are local, so this is only a scale hint, not a measurement.
pub fn guess_unit_scale<'a>(offsets: impl IntoIterator<Item = &'a Position>) -> UnitScale {
    let mut sum = 0.0;
    let mut count = 0usize;
    for offset in offsets {
        sum += offset.x.abs() + offset.y.abs() + offset.z.abs();
        count += 3;
    }
    if count == 0 {
        return UnitScale::Unknown;
    }
    if sum / count as f64 > CM_LIKE_THRESHOLD {
        UnitScale::CentimeterLike
    } else {
        UnitScale::MeterLike
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_from_common_frame_times() {
        assert_eq!(__fps_from_frame_time(0.0083333), Some(120));
        assert_eq!(__fps_from_frame_time(0.0333333), Some(30));
        assert_eq!(__fps_from_frame_time(0.0), None);
        assert_eq!(__fps_from_frame_time(-0.01), None);
        assert_eq!(__fps_from_frame_time(1.5), Some(1));
    }

    #[test]
    fn fps_outside_u32_range_is_unknown() {
        // rounds to zero frames per second
        assert_eq!(__fps_from_frame_time(3.0), None);
        assert_eq!(__fps_from_frame_time(1e-320), None);
        assert_eq!(__fps_from_frame_time(1e-10), None);
        assert_eq!(__fps_from_frame_time(f64::NAN), None);
        assert_eq!(__fps_from_frame_time(f64::INFINITY), None);
    }

    #[test]
    fn unit_guess_from_offset_magnitude() {
        let cm = [Position::new(15.0, -15.0, 15.0)];
        let m = [Position::new(0.5, 0.5, -0.5)];
        assert_eq!(guess_unit_scale(cm.iter()), UnitScale::CentimeterLike);
        assert_eq!(guess_unit_scale(m.iter()), UnitScale::MeterLike);
        assert_eq!(guess_unit_scale(std::iter::empty()), UnitScale::Unknown);
    }
}
