use super::framing::{FramingParams, frame_item};
use rosary_ids::TransitionID;
use rosary_structs::{Aabb, CameraPose, Projection, Quaternion, Vector3};

/// Cubic ease-in-out on `[0, 1]`.
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let f = -2.0 * t + 2.0;
        1.0 - f * f * f * 0.5
    }
}

/// Position and pivot lerp, orientation slerps, all on the same `t`.
pub fn interpolate_pose(from: &CameraPose, to: &CameraPose, t: f32) -> CameraPose {
    CameraPose::new(
        Vector3::lerp(from.position, to.position, t),
        Quaternion::slerp(from.orientation, to.orientation, t).normalized(),
        Vector3::lerp(from.pivot, to.pivot, t),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionHandle(pub TransitionID);

#[derive(Debug, Clone, Copy)]
struct ActiveTransition {
    token: TransitionID,
    from: CameraPose,
    to: CameraPose,
    duration: f32,
    elapsed: f32,
}

/// Live camera plus at most one in-flight transition.
///
/// Starting a transition supersedes the active one and animates from the
/// current, possibly mid-flight, pose. Writes carrying a superseded token are dropped.
#[derive(Debug, Clone)]
pub struct CameraEngine {
    pose: CameraPose,
    projection: Projection,
    baseline: CameraPose,
    duration: f32,
    active: Option<ActiveTransition>,
    last_token: TransitionID,
}

impl CameraEngine {
    pub fn new(pose: CameraPose, projection: Projection, duration: f32) -> Self {
        Self {
            pose,
            projection,
            baseline: pose,
            duration: duration.max(0.0),
            active: None,
            last_token: TransitionID::nil(),
        }
    }

    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn baseline(&self) -> &CameraPose {
        &self.baseline
    }

    pub fn set_baseline(&mut self, baseline: CameraPose) {
        self.baseline = baseline;
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_token(&self) -> Option<TransitionID> {
        self.active.map(|active| active.token)
    }

    /// Drops any transition and jumps to `pose` with `projection`.
    pub fn reset(&mut self, pose: CameraPose, projection: Projection) {
        if let Some(active) = self.active.take() {
            log::debug!("camera: transition {} cancelled by reset", active.token);
        }
        self.pose = pose;
        self.projection = projection;
    }

    /// Begins animating toward `target`, superseding any active transition.
    pub fn start(&mut self, target: CameraPose) -> TransitionHandle {
        self.last_token = self.last_token.next();
        let token = self.last_token;
        if let Some(previous) = self.active.take() {
            log::debug!("camera: transition {} superseded by {token}", previous.token);
        }

        if self.duration <= 0.0 {
            self.pose = target;
            return TransitionHandle(token);
        }
        self.active = Some(ActiveTransition {
            token,
            from: self.pose,
            to: target,
            duration: self.duration,
            elapsed: 0.0,
        });
        TransitionHandle(token)
    }

    /// Frames `bounds` at `zoom` from the current viewing direction.
    pub fn focus(&mut self, bounds: &Aabb, zoom: u32, params: &FramingParams) -> TransitionHandle {
        let baseline_distance = self.baseline.distance_to_pivot();
        let target = frame_item(&self.pose, bounds, zoom, baseline_distance, params);
        self.start(target.pose)
    }

    pub fn restore_baseline(&mut self) -> TransitionHandle {
        self.start(self.baseline)
    }

    /// Returns false when `handle` is not the active transition.
    pub fn cancel(&mut self, handle: TransitionHandle) -> bool {
        if self.active_token() == Some(handle.0) {
            self.active = None;
            log::debug!("camera: transition {} cancelled", handle.0);
            return true;
        }
        false
    }

    /// Writes `pose` on behalf of `handle`; stale handles are ignored.
    pub fn apply(&mut self, handle: TransitionHandle, pose: CameraPose) -> bool {
        if self.active_token() != Some(handle.0) {
            log::trace!("camera: dropped write from stale transition {}", handle.0);
            return false;
        }
        self.pose = pose;
        true
    }

    /// Steps the active transition by `delta` seconds. Returns its handle once it completes.
    pub fn advance(&mut self, delta: f32) -> Option<TransitionHandle> {
        let active = self.active.as_mut()?;
        if delta.is_finite() && delta > 0.0 {
            active.elapsed += delta;
        }
        let progress = (active.elapsed / active.duration).min(1.0);
        let handle = TransitionHandle(active.token);
        let (from, to) = (active.from, active.to);

        if progress >= 1.0 {
            self.apply(handle, to);
            self.active = None;
            return Some(handle);
        }
        self.apply(handle, interpolate_pose(&from, &to, ease_in_out_cubic(progress)));
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose_at(x: f32, y: f32, z: f32) -> CameraPose {
        CameraPose::looking_at(Vector3::new(x, y, z), Vector3::new(x, y, 0.0))
    }

    fn engine(duration: f32) -> CameraEngine {
        CameraEngine::new(pose_at(0.0, 0.0, 50.0), Projection::default(), duration)
    }

    #[test]
    fn easing_hits_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1.0e-6);
        assert!(ease_in_out_cubic(0.25) < 0.25);
        assert!(ease_in_out_cubic(0.75) > 0.75);
    }

    #[test]
    fn transition_completes_exactly_on_target() {
        let mut engine = engine(1.0);
        let target = pose_at(3.0, 1.0, 10.0);
        let handle = engine.start(target);
        assert!(engine.is_animating());
        assert_eq!(engine.advance(0.5), None);
        assert!(!engine.pose().approx_eq(&target, 1.0e-3));
        assert_eq!(engine.advance(0.5), Some(handle));
        assert_eq!(*engine.pose(), target);
        assert!(!engine.is_animating());
    }

    #[test]
    fn all_channels_move_together() {
        let mut engine = engine(1.0);
        let start = *engine.pose();
        let target = pose_at(10.0, 0.0, 20.0);
        engine.start(target);
        engine.advance(0.5);
        let mid = engine.pose();
        let expected = interpolate_pose(&start, &target, ease_in_out_cubic(0.5));
        assert!(mid.approx_eq(&expected, 1.0e-5));
    }

    #[test]
    fn second_request_supersedes_first() {
        let mut engine = engine(1.0);
        let a = pose_at(-5.0, 0.0, 10.0);
        let b = pose_at(5.0, 2.0, 8.0);
        let first = engine.start(a);
        engine.advance(0.3);
        let second = engine.start(b);
        assert_ne!(first, second);
        assert_eq!(engine.active_token(), Some(second.0));

        // Stale handle can neither write nor cancel.
        assert!(!engine.apply(first, a));
        assert!(!engine.cancel(first));

        let mut completed = Vec::new();
        for _ in 0..20 {
            completed.extend(engine.advance(0.1));
        }
        assert_eq!(completed, vec![second]);
        assert_eq!(*engine.pose(), b);
    }

    #[test]
    fn new_transition_starts_from_mid_flight_pose() {
        let mut engine = engine(1.0);
        engine.start(pose_at(-5.0, 0.0, 10.0));
        engine.advance(0.5);
        let mid = *engine.pose();
        engine.start(pose_at(5.0, 0.0, 10.0));
        engine.advance(0.0);
        assert!(engine.pose().approx_eq(&mid, 1.0e-6));
    }

    #[test]
    fn zero_duration_snaps() {
        let mut engine = engine(0.0);
        let target = pose_at(1.0, 1.0, 5.0);
        engine.start(target);
        assert!(!engine.is_animating());
        assert_eq!(*engine.pose(), target);
        assert_eq!(engine.advance(1.0), None);
    }

    #[test]
    fn cancel_leaves_pose_where_it_was() {
        let mut engine = engine(1.0);
        let handle = engine.start(pose_at(4.0, 0.0, 4.0));
        engine.advance(0.25);
        let frozen = *engine.pose();
        assert!(engine.cancel(handle));
        assert_eq!(engine.advance(1.0), None);
        assert_eq!(*engine.pose(), frozen);
    }

    #[test]
    fn restore_baseline_targets_baseline() {
        let mut engine = engine(0.5);
        let baseline = *engine.baseline();
        engine.start(pose_at(1.0, 2.0, 3.0));
        engine.advance(1.0);
        engine.restore_baseline();
        engine.advance(0.5);
        assert_eq!(*engine.pose(), baseline);
    }
}
