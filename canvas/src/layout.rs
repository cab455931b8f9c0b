//! Table geometry: seat placement, footprints, bounding boxes, and placement slots.
//!
//! Everything here is a pure function of a table's current shape, capacity,
//! position, and rotation. Seat coordinates are recomputed on every call and
//! never cached, so a moved or rotated table always reports fresh positions.
//!
//! Rotation is stored as an unbounded cumulative integer; all math here works
//! on [`normalize_rotation`] of it, so `rotation = 375` and `rotation = 15`
//! produce bit-identical layouts.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use std::f64::consts::TAU;

use crate::camera::Point;
use crate::consts::{
    RECT_TABLE_DEPTH, ROUND_TABLE_BASE_RADIUS, ROUND_TABLE_RADIUS_PER_SEAT, SEAT_GAP, SEAT_RADIUS, SEAT_SPACING,
    STAGGER_COLUMNS, STAGGER_ORIGIN_X, STAGGER_ORIGIN_Y, STAGGER_STEP,
};
use crate::doc::{Table, TableShape};

/// World-space position of one seat slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeatPosition {
    /// Seat index in `0..capacity`.
    pub index: u32,
    pub x: f64,
    pub y: f64,
}

impl SeatPosition {
    #[must_use]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Axis-aligned world-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    fn around(p: Point) -> Self {
        Self { min_x: p.x, min_y: p.y, max_x: p.x, max_y: p.y }
    }

    fn include(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.min_x + self.max_x) * 0.5, (self.min_y + self.max_y) * 0.5)
    }

    /// Return a copy grown by `padding` on every side.
    #[must_use]
    pub fn padded(&self, padding: f64) -> Self {
        Self {
            min_x: self.min_x - padding,
            min_y: self.min_y - padding,
            max_x: self.max_x + padding,
            max_y: self.max_y + padding,
        }
    }
}

/// Reduce a cumulative rotation to `[0, 360)` degrees.
#[must_use]
pub fn normalize_rotation(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}

fn round_radius(capacity: u32) -> f64 {
    ROUND_TABLE_RADIUS_PER_SEAT.mul_add(f64::from(capacity), ROUND_TABLE_BASE_RADIUS)
}

/// Seat counts along the (top, bottom) long edges of a rectangular table.
fn rect_rows(shape: TableShape, capacity: u32) -> (u32, u32) {
    match shape {
        TableShape::RectDouble => {
            let top = capacity.div_ceil(2);
            (top, capacity - top)
        }
        TableShape::Round | TableShape::RectSingle => (capacity, 0),
    }
}

/// Half extents `(half_width, half_height)` of an unrotated table body.
#[must_use]
pub fn footprint(shape: TableShape, capacity: u32) -> (f64, f64) {
    match shape {
        TableShape::Round => {
            let r = round_radius(capacity);
            (r, r)
        }
        TableShape::RectSingle | TableShape::RectDouble => {
            let (top, bottom) = rect_rows(shape, capacity);
            let length = f64::from(top.max(bottom).max(1)) * SEAT_SPACING;
            (length * 0.5, RECT_TABLE_DEPTH * 0.5)
        }
    }
}

/// Half extents of `table`'s body before rotation.
#[must_use]
pub fn table_footprint(table: &Table) -> (f64, f64) {
    footprint(table.shape, table.capacity)
}

/// Radius of the smallest centred circle holding the body and every seat.
#[must_use]
pub fn extent_radius(shape: TableShape, capacity: u32) -> f64 {
    let (hw, hh) = footprint(shape, capacity);
    match shape {
        TableShape::Round => hw + SEAT_GAP + SEAT_RADIUS,
        TableShape::RectSingle | TableShape::RectDouble => hw.hypot(hh + SEAT_GAP) + SEAT_RADIUS,
    }
}

fn rotate_about(center: Point, local: Point, degrees: i32) -> Point {
    let (sin, cos) = f64::from(normalize_rotation(degrees)).to_radians().sin_cos();
    Point::new(
        center.x + local.x * cos - local.y * sin,
        center.y + local.x * sin + local.y * cos,
    )
}

/// Express a world point in `table`'s local frame (origin at its centre, unrotated).
#[must_use]
pub fn to_table_local(table: &Table, world: Point) -> Point {
    let dx = world.x - table.x;
    let dy = world.y - table.y;
    let (sin, cos) = f64::from(normalize_rotation(table.rotation)).to_radians().sin_cos();
    Point::new(dx * cos + dy * sin, -dx * sin + dy * cos)
}

fn local_seat_offsets(shape: TableShape, capacity: u32) -> Vec<Point> {
    match shape {
        TableShape::Round => {
            let ring = round_radius(capacity) + SEAT_GAP;
            (0..capacity)
                .map(|i| {
                    let angle = TAU * f64::from(i) / f64::from(capacity) - TAU * 0.25;
                    Point::new(ring * angle.cos(), ring * angle.sin())
                })
                .collect()
        }
        TableShape::RectSingle | TableShape::RectDouble => {
            let (top, bottom) = rect_rows(shape, capacity);
            let edge = RECT_TABLE_DEPTH * 0.5 + SEAT_GAP;
            let row = |count: u32, y: f64| {
                let start = -f64::from(count) * SEAT_SPACING * 0.5;
                (0..count).map(move |i| Point::new(SEAT_SPACING.mul_add(f64::from(i) + 0.5, start), y))
            };
            row(top, -edge).chain(row(bottom, edge)).collect()
        }
    }
}

/// World-space seat positions of `table`, one per seat index in ascending order.
#[must_use]
pub fn seat_positions(table: &Table) -> Vec<SeatPosition> {
    let center = Point::new(table.x, table.y);
    local_seat_offsets(table.shape, table.capacity)
        .into_iter()
        .zip(0_u32..)
        .map(|(local, index)| {
            let p = rotate_about(center, local, table.rotation);
            SeatPosition { index, x: p.x, y: p.y }
        })
        .collect()
}

/// World-space position of a single seat, or `None` when `index` is out of range.
#[must_use]
pub fn seat_position(table: &Table, index: u32) -> Option<Point> {
    seat_positions(table)
        .into_iter()
        .find(|s| s.index == index)
        .map(|s| s.point())
}

/// World-space outline points of the table body (rotated corners, or circle extremes).
#[must_use]
pub fn body_outline(table: &Table) -> Vec<Point> {
    let center = Point::new(table.x, table.y);
    let (hw, hh) = table_footprint(table);
    match table.shape {
        TableShape::Round => vec![
            Point::new(table.x - hw, table.y - hh),
            Point::new(table.x + hw, table.y + hh),
        ],
        TableShape::RectSingle | TableShape::RectDouble => [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)]
            .into_iter()
            .map(|(x, y)| rotate_about(center, Point::new(x, y), table.rotation))
            .collect(),
    }
}

/// Whether `world` lies on `table`'s body.
#[must_use]
pub fn body_contains(table: &Table, world: Point) -> bool {
    let local = to_table_local(table, world);
    let (hw, hh) = table_footprint(table);
    match table.shape {
        TableShape::Round => local.x.hypot(local.y) <= hw,
        TableShape::RectSingle | TableShape::RectDouble => local.x.abs() <= hw && local.y.abs() <= hh,
    }
}

/// Bounding box of every table body and seat, grown by `padding`. `None` when there are no tables.
#[must_use]
pub fn bounding_box<'a>(tables: impl IntoIterator<Item = &'a Table>, padding: f64) -> Option<Bounds> {
    let mut bounds: Option<Bounds> = None;
    for table in tables {
        for p in body_outline(table) {
            grow(&mut bounds, p);
        }
        for seat in seat_positions(table) {
            grow(&mut bounds, Point::new(seat.x - SEAT_RADIUS, seat.y - SEAT_RADIUS));
            grow(&mut bounds, Point::new(seat.x + SEAT_RADIUS, seat.y + SEAT_RADIUS));
        }
    }
    bounds.map(|b| b.padded(padding))
}

fn grow(bounds: &mut Option<Bounds>, p: Point) {
    if let Some(b) = bounds {
        b.include(p);
    } else {
        *bounds = Some(Bounds::around(p));
    }
}

#[allow(clippy::cast_precision_loss)]
fn stagger_slot(slot: usize) -> Point {
    let col = slot % STAGGER_COLUMNS;
    let row = slot / STAGGER_COLUMNS;
    Point::new(
        STAGGER_STEP.mul_add(col as f64, STAGGER_ORIGIN_X),
        STAGGER_STEP.mul_add(row as f64, STAGGER_ORIGIN_Y),
    )
}

/// Upper bound on the slot rows a circle of `reach` around any slot centre can cover.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn blocked_rows(reach: f64) -> usize {
    2 * (reach / STAGGER_STEP).ceil().max(0.0) as usize + 1
}

/// Pick the first grid slot where a new `shape`/`capacity` table overlaps none of `existing`.
///
/// Overlap is judged conservatively with each table's [`extent_radius`], so seats never
/// collide either.
#[must_use]
pub fn staggered_position<'a>(existing: impl IntoIterator<Item = &'a Table>, shape: TableShape, capacity: u32) -> Point {
    let radius = extent_radius(shape, capacity);
    let occupied: Vec<(Point, f64)> = existing
        .into_iter()
        .map(|t| (Point::new(t.x, t.y), extent_radius(t.shape, t.capacity)))
        .collect();

    // A table blocks only the rows within reach of its extent, so a free slot
    // always exists within this range.
    let limit = occupied
        .iter()
        .map(|(_, r)| blocked_rows(radius + r) * STAGGER_COLUMNS)
        .sum::<usize>()
        + 1;
    (0..limit)
        .map(stagger_slot)
        .find(|slot| {
            occupied
                .iter()
                .all(|(center, r)| slot.distance(*center) >= radius + r)
        })
        .unwrap_or_else(|| stagger_slot(limit))
}
