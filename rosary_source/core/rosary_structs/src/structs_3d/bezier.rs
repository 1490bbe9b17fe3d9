use crate::Vector3;

/// Arc-length table resolution used by [`CubicBezier3::spaced_points`].
pub const ARC_LENGTH_DIVISIONS: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier3 {
    pub p0: Vector3,
    pub p1: Vector3,
    pub p2: Vector3,
    pub p3: Vector3,
}

impl CubicBezier3 {
    pub const fn new(p0: Vector3, p1: Vector3, p2: Vector3, p3: Vector3) -> Self {
        Self { p0, p1, p2, p3 }
    }

    pub fn point(&self, t: f32) -> Vector3 {
        let u = 1.0 - t;
        self.p0 * (u * u * u)
            + self.p1 * (3.0 * u * u * t)
            + self.p2 * (3.0 * u * t * t)
            + self.p3 * (t * t * t)
    }

    /// Cumulative chord lengths over `divisions + 1` samples.
    fn arc_lengths(&self, divisions: usize) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut last = self.point(0.0);
        let mut sum = 0.0;
        lengths.push(0.0);
        for i in 1..=divisions {
            let current = self.point(i as f32 / divisions as f32);
            sum += Vector3::distance(current, last);
            lengths.push(sum);
            last = current;
        }
        lengths
    }

    fn u_to_t(lengths: &[f32], u: f32) -> f32 {
        let count = lengths.len();
        let Some(&total) = lengths.last() else {
            return u;
        };
        if count < 2 || total <= 0.0 {
            return u;
        }
        let target = u.clamp(0.0, 1.0) * total;
        // Last index whose cumulative length does not exceed the target.
        let i = lengths
            .partition_point(|&l| l <= target)
            .saturating_sub(1)
            .min(count - 2);
        let before = lengths[i];
        if before == target {
            return i as f32 / (count - 1) as f32;
        }
        let segment = lengths[i + 1] - before;
        let fraction = if segment > 0.0 {
            (target - before) / segment
        } else {
            0.0
        };
        (i as f32 + fraction) / (count - 1) as f32
    }

    pub fn length(&self) -> f32 {
        self.arc_lengths(ARC_LENGTH_DIVISIONS)
            .last()
            .copied()
            .unwrap_or(0.0)
    }

    /// `divisions + 1` points spaced evenly by arc length, endpoints included.
    pub fn spaced_points(&self, divisions: usize) -> Vec<Vector3> {
        if divisions == 0 {
            return vec![self.p0];
        }
        let lengths = self.arc_lengths(ARC_LENGTH_DIVISIONS);
        (0..=divisions)
            .map(|d| self.point(Self::u_to_t(&lengths, d as f32 / divisions as f32)))
            .collect()
    }
}
