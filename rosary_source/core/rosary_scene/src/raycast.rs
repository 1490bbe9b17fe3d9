//! Ray intersection against mesh shapes in their local space.
//!
//! All functions take a unit direction and return the smallest `t >= 0`.

use crate::Shape;
use rosary_structs::Vector3;

const EPSILON: f32 = 1.0e-7;

fn nearest_non_negative(t0: f32, t1: f32) -> Option<f32> {
    let (near, far) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        Some(far)
    } else {
        None
    }
}

pub fn intersect_sphere(origin: Vector3, dir: Vector3, center: Vector3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let h = b * b - c;
    if h < 0.0 {
        return None;
    }
    let h = h.sqrt();
    nearest_non_negative(-b - h, -b + h)
}

pub fn intersect_box(origin: Vector3, dir: Vector3, half: Vector3) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for (o, d, h) in [
        (origin.x, dir.x, half.x),
        (origin.y, dir.y, half.y),
        (origin.z, dir.z, half.z),
    ] {
        if d.abs() < EPSILON {
            if o < -h || o > h {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let (a, b) = ((-h - o) * inv, (h - o) * inv);
        t_min = t_min.max(a.min(b));
        t_max = t_max.min(a.max(b));
        if t_min > t_max {
            return None;
        }
    }
    nearest_non_negative(t_min, t_max)
}

pub fn intersect_cylinder(origin: Vector3, dir: Vector3, radius: f32, height: f32) -> Option<f32> {
    let half = height * 0.5;
    let mut best: Option<f32> = None;
    let mut consider = |t: f32| {
        if t >= 0.0 && best.is_none_or(|b| t < b) {
            best = Some(t);
        }
    };

    let a = dir.x * dir.x + dir.z * dir.z;
    if a > EPSILON {
        let b = origin.x * dir.x + origin.z * dir.z;
        let c = origin.x * origin.x + origin.z * origin.z - radius * radius;
        let h = b * b - a * c;
        if h >= 0.0 {
            let h = h.sqrt();
            for t in [(-b - h) / a, (-b + h) / a] {
                let y = origin.y + t * dir.y;
                if (-half..=half).contains(&y) {
                    consider(t);
                }
            }
        }
    }

    if dir.y.abs() > EPSILON {
        for cap in [-half, half] {
            let t = (cap - origin.y) / dir.y;
            let x = origin.x + t * dir.x;
            let z = origin.z + t * dir.z;
            if x * x + z * z <= radius * radius {
                consider(t);
            }
        }
    }
    best
}

/// Capsule between `a` and `b`.
pub fn intersect_capsule(
    origin: Vector3,
    dir: Vector3,
    a: Vector3,
    b: Vector3,
    radius: f32,
) -> Option<f32> {
    let ba = b - a;
    let oa = origin - a;
    let baba = ba.dot(ba);
    if baba < EPSILON {
        return intersect_sphere(origin, dir, a, radius);
    }
    let bard = ba.dot(dir);
    let baoa = ba.dot(oa);

    let mut best: Option<f32> = None;
    let mut consider = |t: f32| {
        if t >= 0.0 && best.is_none_or(|b| t < b) {
            best = Some(t);
        }
    };

    let qa = baba - bard * bard;
    if qa > EPSILON {
        let qb = baba * dir.dot(oa) - baoa * bard;
        let qc = baba * oa.dot(oa) - baoa * baoa - radius * radius * baba;
        let h = qb * qb - qa * qc;
        if h >= 0.0 {
            let h = h.sqrt();
            for t in [(-qb - h) / qa, (-qb + h) / qa] {
                let y = baoa + t * bard;
                if y > 0.0 && y < baba {
                    consider(t);
                }
            }
        }
    }
    for end in [a, b] {
        if let Some(t) = intersect_sphere(origin, dir, end, radius) {
            consider(t);
        }
    }
    best
}

pub fn intersect_shape(shape: &Shape, origin: Vector3, dir: Vector3) -> Option<f32> {
    match shape {
        Shape::Sphere { radius } => intersect_sphere(origin, dir, Vector3::ZERO, *radius),
        Shape::Box { size } => intersect_box(origin, dir, *size * 0.5),
        Shape::Cylinder { radius, height } => intersect_cylinder(origin, dir, *radius, *height),
        Shape::Tube { points, radius } => points
            .windows(2)
            .filter_map(|w| intersect_capsule(origin, dir, w[0], w[1], *radius))
            .min_by(f32::total_cmp),
    }
}
