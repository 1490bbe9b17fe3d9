//! Fixed rosary path: loops, chain, pendant, cross and every bead on them.
//!
//! `build_rosary` always returns the same slots in the same order, so item
//! positions derived from it survive scene rebuilds.

use crate::{Scene, Shape};
use rosary_ids::NodeID;
use rosary_structs::{Color, CubicBezier3, Transform3D, Vector3};

pub const SMALL_BEAD_RADIUS: f32 = 0.15;
pub const LARGE_BEAD_RADIUS: f32 = 0.18;
pub const CENTER_BEAD_RADIUS: f32 = 0.25;
pub const CHAIN_RADIUS: f32 = 0.04;

pub const TOP_LOOP: CubicBezier3 = CubicBezier3::new(
    Vector3::new(-0.5, 0.0, 0.0),
    Vector3::new(-10.0, 10.0, 0.0),
    Vector3::new(10.0, 10.0, 0.0),
    Vector3::new(0.5, 0.0, 0.0),
);

pub const BOTTOM_LOOP: CubicBezier3 = CubicBezier3::new(
    Vector3::new(-0.5, 0.0, 0.0),
    Vector3::new(0.0, -0.5, 0.0),
    Vector3::new(0.0, -0.5, 0.0),
    Vector3::new(0.5, 0.0, 0.0),
);

/// Spacing divisions along the top loop (111 points).
const TOP_LOOP_DIVISIONS: usize = 110;
const BOTTOM_LOOP_DIVISIONS: usize = 32;
/// Beads occupy every second spaced point in this range.
const LOOP_BEAD_POINTS: std::ops::RangeInclusive<usize> = 2..=108;
/// Every this-many loop beads is an Our Father.
const DECADE_STRIDE: usize = 11;

const CHAIN_HEIGHT: f32 = 3.5;
const CHAIN_CENTER_Y: f32 = -2.125;
const CENTER_BEAD_Y: f32 = -0.35;
const PENDANT_BEADS: usize = 5;
const PENDANT_SPACING: f32 = 0.5;
const PENDANT_OFFSET: f32 = 0.25;
const CROSS_Y: f32 = -4.5;

pub const LOOP_BEAD_COUNT: usize = 54;
pub const ITEM_COUNT: usize = 1 + PENDANT_BEADS + LOOP_BEAD_COUNT + 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BeadRole {
    Cross,
    OurFather,
    HailMary,
    HailHolyQueen,
}

impl BeadRole {
    pub fn radius(self) -> f32 {
        match self {
            BeadRole::HailMary => SMALL_BEAD_RADIUS,
            BeadRole::OurFather => LARGE_BEAD_RADIUS,
            BeadRole::HailHolyQueen => CENTER_BEAD_RADIUS,
            BeadRole::Cross => 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotKind {
    Single(NodeID),
    /// Hits on any part resolve to the root.
    Group { root: NodeID, parts: Vec<NodeID> },
}

/// One focusable position on the path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathSlot {
    pub role: BeadRole,
    pub kind: SlotKind,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutColors {
    pub chain: Color,
    pub small_bead: Color,
    pub large_bead: Color,
    pub cross: Color,
    pub center: Color,
}

impl LayoutColors {
    pub fn for_role(&self, role: BeadRole) -> Color {
        match role {
            BeadRole::Cross => self.cross,
            BeadRole::OurFather => self.large_bead,
            BeadRole::HailMary => self.small_bead,
            BeadRole::HailHolyQueen => self.center,
        }
    }
}

impl Default for LayoutColors {
    fn default() -> Self {
        Self {
            chain: Color::rgb(0x60, 0x62, 0x65),
            small_bead: Color::rgb(0xe1, 0xe3, 0xe6),
            large_bead: Color::rgb(0x39, 0xff, 0xb4),
            cross: Color::rgb(0xa2, 0x6f, 0x56),
            center: Color::rgb(0x39, 0xff, 0xb4),
        }
    }
}

/// Role of the `count`-th loop bead (1-based, counted from the pendant side).
pub fn loop_bead_role(count: usize) -> BeadRole {
    if count % DECADE_STRIDE == 0 {
        BeadRole::OurFather
    } else {
        BeadRole::HailMary
    }
}

/// Role of the `k`-th pendant bead counted from the centre bead downward.
fn pendant_role(k: usize) -> BeadRole {
    if k == 1 || k == PENDANT_BEADS {
        BeadRole::OurFather
    } else {
        BeadRole::HailMary
    }
}

fn bead(scene: &mut Scene, name: String, position: Vector3, role: BeadRole, colors: &LayoutColors) -> NodeID {
    scene.add_mesh(
        NodeID::nil(),
        name,
        Transform3D::from_position(position),
        Shape::Sphere {
            radius: role.radius(),
        },
        colors.for_role(role),
    )
}

/// Adds the whole rosary to `scene` and returns its focusable slots in path order.
pub fn build_rosary(scene: &mut Scene, colors: &LayoutColors) -> Vec<PathSlot> {
    let top_points = TOP_LOOP.spaced_points(TOP_LOOP_DIVISIONS);

    scene.add_mesh(
        NodeID::nil(),
        "top_loop",
        Transform3D::IDENTITY,
        Shape::Tube {
            points: top_points.clone(),
            radius: CHAIN_RADIUS,
        },
        colors.chain,
    );
    scene.add_mesh(
        NodeID::nil(),
        "bottom_loop",
        Transform3D::IDENTITY,
        Shape::Tube {
            points: BOTTOM_LOOP.spaced_points(BOTTOM_LOOP_DIVISIONS),
            radius: CHAIN_RADIUS,
        },
        colors.chain,
    );
    scene.add_mesh(
        NodeID::nil(),
        "chain",
        Transform3D::from_position(Vector3::new(0.0, CHAIN_CENTER_Y, 0.0)),
        Shape::Cylinder {
            radius: CHAIN_RADIUS,
            height: CHAIN_HEIGHT,
        },
        colors.chain,
    );

    let mut slots = Vec::with_capacity(ITEM_COUNT);

    let cross = scene.add_group(
        NodeID::nil(),
        "cross",
        Transform3D::from_position(Vector3::new(0.0, CROSS_Y, 0.0)),
    );
    let vertical = scene.add_mesh(
        cross,
        "cross_vertical",
        Transform3D::IDENTITY,
        Shape::Box {
            size: Vector3::new(0.2, 1.5, 0.2),
        },
        colors.cross,
    );
    let horizontal = scene.add_mesh(
        cross,
        "cross_horizontal",
        Transform3D::from_position(Vector3::new(0.0, 0.25, 0.0)),
        Shape::Box {
            size: Vector3::new(1.0, 0.2, 0.2),
        },
        colors.cross,
    );
    slots.push(PathSlot {
        role: BeadRole::Cross,
        kind: SlotKind::Group {
            root: cross,
            parts: vec![vertical, horizontal],
        },
    });

    for k in (1..=PENDANT_BEADS).rev() {
        let role = pendant_role(k);
        let y = CENTER_BEAD_Y - k as f32 * PENDANT_SPACING - PENDANT_OFFSET;
        let id = bead(scene, format!("pendant_bead_{k}"), Vector3::new(0.0, y, 0.0), role, colors);
        slots.push(PathSlot {
            role,
            kind: SlotKind::Single(id),
        });
    }

    for (count, point) in LOOP_BEAD_POINTS
        .step_by(2)
        .filter_map(|i| top_points.get(i).copied())
        .enumerate()
        .map(|(i, p)| (i + 1, p))
    {
        let role = loop_bead_role(count);
        let id = bead(scene, format!("loop_bead_{count}"), point, role, colors);
        slots.push(PathSlot {
            role,
            kind: SlotKind::Single(id),
        });
    }

    let center = bead(
        scene,
        "center_bead".to_string(),
        Vector3::new(0.0, CENTER_BEAD_Y, 0.0),
        BeadRole::HailHolyQueen,
        colors,
    );
    slots.push(PathSlot {
        role: BeadRole::HailHolyQueen,
        kind: SlotKind::Single(center),
    });

    log::debug!(
        "rosary layout: {} slots, {} scene nodes",
        slots.len(),
        scene.len()
    );
    slots
}
