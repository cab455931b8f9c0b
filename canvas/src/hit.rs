#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::consts::{HIT_SLOP_PX, SEAT_RADIUS};
use crate::doc::{SeatRef, SeatingDoc, TableId};
use crate::layout;

/// Which part of a table was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    Seat(u32),
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub table_id: TableId,
    pub part: HitPart,
}

impl Hit {
    /// The seat this hit landed on, if it was a seat.
    #[must_use]
    pub fn seat(&self) -> Option<SeatRef> {
        match self.part {
            HitPart::Seat(index) => Some(SeatRef::new(self.table_id, index)),
            HitPart::Body => None,
        }
    }
}

/// Test which table (if any) is under `world_pt`.
///
/// Tables are checked top-most first (reverse draw order). For each table its
/// seats are checked before its body, so a seat overlapping a neighbour's body
/// still wins for the table drawn on top. Seat radii get a screen-space slop so
/// small seats stay grabbable when zoomed out.
#[must_use]
pub fn hit_test(world_pt: Point, doc: &SeatingDoc, camera: &Camera) -> Option<Hit> {
    let seat_radius = SEAT_RADIUS + camera.screen_dist_to_world(HIT_SLOP_PX);

    for table in doc.sorted_tables().into_iter().rev() {
        let seat = layout::seat_positions(table)
            .into_iter()
            .find(|s| s.point().distance(world_pt) <= seat_radius);
        if let Some(seat) = seat {
            return Some(Hit { table_id: table.id, part: HitPart::Seat(seat.index) });
        }
        if layout::body_contains(table, world_pt) {
            return Some(Hit { table_id: table.id, part: HitPart::Body });
        }
    }
    None
}
