//! Target pose computation for a focused item.

use rosary_structs::{Aabb, CameraPose, Quaternion, Vector3};

/// Static inputs of the framing curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramingParams {
    pub fov_degrees: f32,
    /// Multiplier on the exact-fit distance.
    pub padding: f32,
    /// Fallback distance for zero-size items, and the closest allowed distance.
    pub min_distance: f32,
    pub min_zoom: u32,
    pub max_zoom: u32,
}

/// Per-request inputs of the framing curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramingInput {
    /// Camera-to-pivot distance of the baseline pose.
    pub baseline_distance: f32,
    /// Largest dimension of the item's world bounds.
    pub extent: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramingTarget {
    pub pose: CameraPose,
    pub distance: f32,
    /// Bounds were empty or zero-sized. Above minimum zoom the distance is then
    /// exactly `min_distance`; at minimum zoom it is the baseline distance.
    pub degenerate: bool,
}

/// Distance at which `extent` fills the vertical field of view, times `padding`.
/// `None` for zero, negative or non-finite extents.
pub fn fit_distance(extent: f32, fov_degrees: f32, padding: f32) -> Option<f32> {
    if !(extent.is_finite() && extent > 0.0) {
        return None;
    }
    let half_fov = (fov_degrees.to_radians() * 0.5).tan();
    let distance = extent * 0.5 / half_fov * padding;
    (distance.is_finite() && distance > 0.0).then_some(distance)
}

/// Closest distance, reached at `max_zoom`. Always below `baseline`.
fn closest_distance(input: &FramingInput, params: &FramingParams, baseline: f32) -> f32 {
    let fit = fit_distance(input.extent, params.fov_degrees, params.padding)
        .unwrap_or(params.min_distance);
    fit.max(params.min_distance).min(baseline * 0.9)
}

fn baseline_distance(input: &FramingInput, params: &FramingParams) -> f32 {
    if input.baseline_distance.is_finite() && input.baseline_distance > 0.0 {
        input.baseline_distance
    } else {
        params.min_distance.max(f32::EPSILON) * 10.0
    }
}

/// Camera-to-centre distance for `zoom`, clamped to the configured range.
///
/// Interpolates geometrically from the baseline distance at `min_zoom` to the
/// item-fitting distance at `max_zoom`, so it strictly decreases with zoom.
pub fn framing_distance(zoom: u32, input: &FramingInput, params: &FramingParams) -> f32 {
    let baseline = baseline_distance(input, params);
    let span = params.max_zoom.saturating_sub(params.min_zoom);
    let zoom = zoom.clamp(params.min_zoom, params.max_zoom.max(params.min_zoom));
    if span == 0 || zoom == params.min_zoom {
        return baseline;
    }
    let closest = closest_distance(input, params, baseline);
    let t = (zoom - params.min_zoom) as f32 / span as f32;
    baseline * (closest / baseline).powf(t)
}

/// Pose that keeps the current viewing direction and centres `bounds` at `zoom`.
pub fn frame_item(
    current: &CameraPose,
    bounds: &Aabb,
    zoom: u32,
    baseline_distance: f32,
    params: &FramingParams,
) -> FramingTarget {
    let extent = bounds.largest_extent();
    let degenerate = bounds.is_empty() || !(extent.is_finite() && extent > 0.0);
    let center = if bounds.is_empty() || !bounds.center().is_finite() {
        current.pivot
    } else {
        bounds.center()
    };
    if degenerate {
        log::debug!("framing: degenerate bounds {bounds:?}, using min distance");
    }

    let input = FramingInput {
        baseline_distance,
        extent,
    };
    let distance = if degenerate && zoom > params.min_zoom {
        params.min_distance
    } else {
        framing_distance(zoom, &input, params)
    };
    let direction = (current.position - current.pivot)
        .try_normalized()
        .unwrap_or(Vector3::BACK);
    let position = center + direction * distance;

    FramingTarget {
        pose: CameraPose::new(
            position,
            Quaternion::looking_at(position, center, Vector3::UP),
            center,
        ),
        distance,
        degenerate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> FramingParams {
        FramingParams {
            fov_degrees: 20.0,
            padding: 1.2,
            min_distance: 0.6,
            min_zoom: 0,
            max_zoom: 2,
        }
    }

    fn input(extent: f32) -> FramingInput {
        FramingInput {
            baseline_distance: 50.0,
            extent,
        }
    }

    #[test]
    fn min_zoom_reproduces_baseline() {
        for extent in [0.0, 0.3, 1.5, 100.0] {
            assert_eq!(framing_distance(0, &input(extent), &params()), 50.0);
        }
    }

    #[test]
    fn distance_strictly_decreases_with_zoom() {
        let mut p = params();
        p.max_zoom = 6;
        for extent in [0.0, 0.3, 1.5, 100.0, f32::NAN] {
            let distances: Vec<f32> = (0..=6)
                .map(|z| framing_distance(z, &input(extent), &p))
                .collect();
            assert!(
                distances.windows(2).all(|w| w[1] < w[0]),
                "extent {extent}: {distances:?}"
            );
            assert!(distances.iter().all(|d| d.is_finite() && *d > 0.0));
        }
    }

    #[test]
    fn zoom_beyond_range_is_clamped() {
        let d2 = framing_distance(2, &input(0.3), &params());
        assert_eq!(framing_distance(9, &input(0.3), &params()), d2);
    }

    #[test]
    fn max_zoom_fits_the_item() {
        let expected = fit_distance(0.3, 20.0, 1.2).unwrap();
        let d = framing_distance(2, &input(0.3), &params());
        assert!((d - expected).abs() < 1.0e-3, "{d} vs {expected}");
    }

    #[test]
    fn degenerate_bounds_use_min_distance() {
        let current = CameraPose::looking_at(Vector3::new(0.0, 0.0, 50.0), Vector3::ZERO);
        let point = Aabb::new(Vector3::new(1.0, 2.0, 0.0), Vector3::new(1.0, 2.0, 0.0));
        let target = frame_item(&current, &point, 2, 50.0, &params());
        assert!(target.degenerate);
        assert!(target.pose.is_finite());
        assert!((target.distance - 0.6).abs() < 1.0e-5);
        assert_eq!(target.pose.pivot, Vector3::new(1.0, 2.0, 0.0));

        let mid = frame_item(&current, &point, 1, 50.0, &params());
        assert!(mid.degenerate);
        assert!((mid.distance - 0.6).abs() < 1.0e-5, "{}", mid.distance);
        assert!(mid.pose.position.abs_diff_eq(Vector3::new(1.0, 2.0, 0.6), 1.0e-4));

        let at_min = frame_item(&current, &point, 0, 50.0, &params());
        assert!(at_min.degenerate);
        assert_eq!(at_min.distance, 50.0);

        let empty = frame_item(&current, &Aabb::EMPTY, 1, 50.0, &params());
        assert!(empty.degenerate);
        assert!(empty.pose.is_finite());
        assert_eq!(empty.pose.pivot, current.pivot);
        assert!((empty.distance - 0.6).abs() < 1.0e-5);
    }

    #[test]
    fn frame_keeps_current_viewing_direction() {
        let current = CameraPose::looking_at(Vector3::new(10.0, 0.0, 10.0), Vector3::ZERO);
        let bounds = Aabb::from_center_half_extents(Vector3::new(0.0, 5.0, 0.0), Vector3::splat(0.15));
        let target = frame_item(&current, &bounds, 2, current.distance_to_pivot(), &params());
        let direction = (target.pose.position - target.pose.pivot).normalized();
        assert!(direction.abs_diff_eq(Vector3::new(1.0, 0.0, 1.0).normalized(), 1.0e-5));
        assert!(target.pose.pivot.abs_diff_eq(Vector3::new(0.0, 5.0, 0.0), 1.0e-6));
        let forward = target.pose.orientation.forward();
        assert!(forward.abs_diff_eq(-direction, 1.0e-4));
    }

    #[test]
    fn camera_on_pivot_falls_back_to_back_axis() {
        let current = CameraPose::new(Vector3::ZERO, Quaternion::IDENTITY, Vector3::ZERO);
        let bounds = Aabb::from_center_half_extents(Vector3::ZERO, Vector3::splat(0.5));
        let target = frame_item(&current, &bounds, 1, 50.0, &params());
        assert!(target.pose.position.z > 0.0);
        assert!(target.pose.is_finite());
    }

    #[test]
    fn invalid_baseline_stays_finite() {
        let bad = FramingInput {
            baseline_distance: f32::NAN,
            extent: 0.3,
        };
        for z in 0..=2 {
            let d = framing_distance(z, &bad, &params());
            assert!(d.is_finite() && d > 0.0);
        }
    }
}
