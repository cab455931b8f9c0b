//! Document model: tables, guests, families, seat references, and the in-memory store.
//!
//! This module defines the data the seating canvas works on (`Table`,
//! `Guest`, `Family`), the reference type that ties a guest to a seat
//! (`SeatRef`), the wire snapshot exchanged with the remote store
//! (`Snapshot`), and the runtime store that owns all live records
//! (`SeatingDoc`).
//!
//! Tables are values: every persisted change replaces the whole `Table`, which
//! lets the persistence layer keep the previous value for rollback. Seats are
//! not stored at all; they are derived from table geometry by
//! [`crate::layout`].

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a table.
pub type TableId = Uuid;

/// Unique identifier for a guest.
pub type GuestId = Uuid;

/// Unique identifier for a family group.
pub type FamilyId = Uuid;

/// Unique identifier for the workspace (event) that owns a seating plan.
pub type WorkspaceId = Uuid;

// =============================================================
// Validation errors
// =============================================================

/// A table or seat request that violates the model's geometric bounds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("capacity {capacity} is outside 1..={max} for a {shape} table")]
    CapacityOutOfRange { shape: TableShape, capacity: u32, max: u32 },
    #[error("seat {seat_index} does not exist on a table with {capacity} seats")]
    SeatOutOfRange { seat_index: u32, capacity: u32 },
    #[error("seat {seat_index} is occupied and would fall outside the new capacity {capacity}")]
    OccupiedSeatBeyondCapacity { seat_index: u32, capacity: u32 },
}

// =============================================================
// Tables
// =============================================================

/// The physical shape of a table, which bounds its capacity and seat layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableShape {
    /// Seats spread evenly around a circle.
    Round,
    /// Rectangular, seats along one long edge only.
    RectSingle,
    /// Rectangular, seats along both long edges.
    RectDouble,
}

impl TableShape {
    /// Largest capacity a table of this shape may have.
    #[must_use]
    pub fn max_capacity(self) -> u32 {
        match self {
            Self::Round => 10,
            Self::RectSingle | Self::RectDouble => 20,
        }
    }

    /// Wire name of the shape.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Round => "round",
            Self::RectSingle => "rect_single",
            Self::RectDouble => "rect_double",
        }
    }

    /// Parse a wire name.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "round" => Some(Self::Round),
            "rect_single" => Some(Self::RectSingle),
            "rect_double" => Some(Self::RectDouble),
            _ => None,
        }
    }
}

impl std::fmt::Display for TableShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reject a capacity of zero or above the shape's bound.
///
/// # Errors
///
/// Returns [`GeometryError::CapacityOutOfRange`] when `capacity` is not in `1..=max`.
pub fn validate_capacity(shape: TableShape, capacity: u32) -> Result<(), GeometryError> {
    let max = shape.max_capacity();
    if capacity == 0 || capacity > max {
        return Err(GeometryError::CapacityOutOfRange { shape, capacity, max });
    }
    Ok(())
}

/// A seating table as stored in the document and on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Unique identifier for this table.
    pub id: TableId,
    /// Display name ("Table 1", "Head table", ...).
    pub name: String,
    pub shape: TableShape,
    /// Number of seats; bounded by [`TableShape::max_capacity`].
    pub capacity: u32,
    /// Centre x in world coordinates.
    pub x: f64,
    /// Centre y in world coordinates.
    pub y: f64,
    /// Clockwise rotation in degrees. Cumulative and unbounded; read it through
    /// [`crate::layout::normalize_rotation`].
    #[serde(rename = "rotationDegrees")]
    pub rotation: i32,
}

impl Table {
    /// Check the table's capacity against its shape.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::CapacityOutOfRange`] for an invalid capacity.
    pub fn validate(&self) -> Result<(), GeometryError> {
        validate_capacity(self.shape, self.capacity)
    }

    /// Check that `seat_index` names a seat on this table.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::SeatOutOfRange`] when `seat_index >= capacity`.
    pub fn check_seat(&self, seat_index: u32) -> Result<(), GeometryError> {
        if seat_index >= self.capacity {
            return Err(GeometryError::SeatOutOfRange { seat_index, capacity: self.capacity });
        }
        Ok(())
    }

    /// Rotation reduced to `[0, 360)` for display.
    #[must_use]
    pub fn display_rotation(&self) -> i32 {
        crate::layout::normalize_rotation(self.rotation)
    }
}

// =============================================================
// Guests and families
// =============================================================

/// A concrete seat: a table plus a seat index on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatRef {
    pub table_id: TableId,
    pub seat_index: u32,
}

impl SeatRef {
    #[must_use]
    pub fn new(table_id: TableId, seat_index: u32) -> Self {
        Self { table_id, seat_index }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuestType {
    #[default]
    Adult,
    Child,
    Infant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsvpStatus {
    #[default]
    Pending,
    Confirmed,
    Declined,
}

/// A guest. The seat is a single optional pair, so a table without a seat
/// index (or the reverse) cannot be represented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "GuestRecord", into = "GuestRecord")]
pub struct Guest {
    pub id: GuestId,
    pub name: String,
    pub surname: String,
    pub guest_type: GuestType,
    pub rsvp_status: RsvpStatus,
    pub family_id: Option<FamilyId>,
    /// Family head ("capo famiglia"); affects grouping order only.
    pub is_family_head: bool,
    pub seat: Option<SeatRef>,
}

impl Guest {
    /// Short label drawn on an occupied seat.
    #[must_use]
    pub fn initials(&self) -> String {
        self.name
            .chars()
            .take(1)
            .chain(self.surname.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Flat wire shape of a guest as served by the guest-management collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GuestRecord {
    id: GuestId,
    name: String,
    #[serde(default)]
    surname: String,
    #[serde(default)]
    guest_type: GuestType,
    #[serde(default)]
    rsvp_status: RsvpStatus,
    #[serde(default)]
    family_id: Option<FamilyId>,
    #[serde(default)]
    is_family_head: Option<bool>,
    #[serde(default)]
    table_id: Option<TableId>,
    #[serde(default)]
    seat_index: Option<u32>,
}

impl From<GuestRecord> for Guest {
    fn from(r: GuestRecord) -> Self {
        // A half-set pair is not an assignment.
        let seat = match (r.table_id, r.seat_index) {
            (Some(table_id), Some(seat_index)) => Some(SeatRef { table_id, seat_index }),
            _ => None,
        };
        Self {
            id: r.id,
            name: r.name,
            surname: r.surname,
            guest_type: r.guest_type,
            rsvp_status: r.rsvp_status,
            family_id: r.family_id,
            is_family_head: r.is_family_head.unwrap_or(false),
            seat,
        }
    }
}

impl From<Guest> for GuestRecord {
    fn from(g: Guest) -> Self {
        Self {
            id: g.id,
            name: g.name,
            surname: g.surname,
            guest_type: g.guest_type,
            rsvp_status: g.rsvp_status,
            family_id: g.family_id,
            is_family_head: Some(g.is_family_head),
            table_id: g.seat.map(|s| s.table_id),
            seat_index: g.seat.map(|s| s.seat_index),
        }
    }
}

/// A family (or any named group) used to group guests in the unassigned panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    pub id: FamilyId,
    pub name: String,
}

/// Unassigned guests that share a family, in panel order.
#[derive(Debug, Clone, PartialEq)]
pub struct GuestGroup<'a> {
    /// `None` for guests without a family.
    pub family: Option<&'a Family>,
    pub guests: Vec<&'a Guest>,
}

/// Occupancy of one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSummary {
    pub table_id: TableId,
    pub occupied: u32,
    pub capacity: u32,
}

// =============================================================
// Snapshot
// =============================================================

/// Everything the canvas needs for one workspace, as loaded from the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub guests: Vec<Guest>,
    #[serde(default)]
    pub families: Vec<Family>,
}

impl Snapshot {
    /// Parse a snapshot from its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

// =============================================================
// Store
// =============================================================

/// In-memory store of tables, guests, and families.
#[derive(Debug, Clone, Default)]
pub struct SeatingDoc {
    tables: HashMap<TableId, Table>,
    guests: HashMap<GuestId, Guest>,
    families: Vec<Family>,
}

impl SeatingDoc {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all records with a full snapshot.
    pub fn load_snapshot(&mut self, snapshot: Snapshot) {
        self.tables = snapshot.tables.into_iter().map(|t| (t.id, t)).collect();
        self.guests = snapshot.guests.into_iter().map(|g| (g.id, g)).collect();
        self.families = snapshot.families;
    }

    /// Export the current records as a snapshot, tables and guests sorted by id.
    #[must_use]
    pub fn to_snapshot(&self) -> Snapshot {
        let mut guests: Vec<Guest> = self.guests.values().cloned().collect();
        guests.sort_by_key(|g| g.id);
        Snapshot {
            tables: self.sorted_tables().into_iter().cloned().collect(),
            guests,
            families: self.families.clone(),
        }
    }

    // --- Tables ---

    /// Return a reference to a table by id.
    #[must_use]
    pub fn table(&self, id: &TableId) -> Option<&Table> {
        self.tables.get(id)
    }

    /// Insert or replace a table, returning the previous value.
    pub fn insert_table(&mut self, table: Table) -> Option<Table> {
        self.tables.insert(table.id, table)
    }

    /// Remove a table by id, returning it if it was present. Guests are left untouched.
    pub fn remove_table(&mut self, id: &TableId) -> Option<Table> {
        self.tables.remove(id)
    }

    /// Move a table's centre. Returns false if the table doesn't exist.
    pub fn set_table_position(&mut self, id: &TableId, x: f64, y: f64) -> bool {
        let Some(table) = self.tables.get_mut(id) else {
            return false;
        };
        table.x = x;
        table.y = y;
        true
    }

    /// Set a table's stored rotation. Returns false if the table doesn't exist.
    pub fn set_table_rotation(&mut self, id: &TableId, rotation: i32) -> bool {
        let Some(table) = self.tables.get_mut(id) else {
            return false;
        };
        table.rotation = rotation;
        true
    }

    /// All tables sorted by id, the canvas draw order (later tables draw on top).
    #[must_use]
    pub fn sorted_tables(&self) -> Vec<&Table> {
        let mut tables: Vec<&Table> = self.tables.values().collect();
        tables.sort_by_key(|t| t.id);
        tables
    }

    /// Number of tables currently in the store.
    #[must_use]
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    // --- Guests ---

    /// Return a reference to a guest by id.
    #[must_use]
    pub fn guest(&self, id: &GuestId) -> Option<&Guest> {
        self.guests.get(id)
    }

    /// Insert or replace a guest, returning the previous value.
    pub fn insert_guest(&mut self, guest: Guest) -> Option<Guest> {
        self.guests.insert(guest.id, guest)
    }

    /// Set or clear a guest's seat. Returns the previous seat, or `None` when the
    /// guest doesn't exist.
    pub fn set_guest_seat(&mut self, id: &GuestId, seat: Option<SeatRef>) -> Option<Option<SeatRef>> {
        let guest = self.guests.get_mut(id)?;
        Some(std::mem::replace(&mut guest.seat, seat))
    }

    /// The guest currently holding `seat`, if any.
    #[must_use]
    pub fn occupant(&self, seat: SeatRef) -> Option<&Guest> {
        self.guests.values().find(|g| g.seat == Some(seat))
    }

    /// Guests seated at `table_id`, ordered by seat index.
    #[must_use]
    pub fn guests_at_table(&self, table_id: &TableId) -> Vec<&Guest> {
        let mut seated: Vec<&Guest> = self
            .guests
            .values()
            .filter(|g| g.seat.is_some_and(|s| s.table_id == *table_id))
            .collect();
        seated.sort_by_key(|g| g.seat.map(|s| s.seat_index));
        seated
    }

    /// Number of occupied seats at `table_id`.
    #[must_use]
    pub fn occupied_count(&self, table_id: &TableId) -> u32 {
        let count = self
            .guests
            .values()
            .filter(|g| g.seat.is_some_and(|s| s.table_id == *table_id))
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Lowest free seat index at `table_id`, or `None` when the table is full or unknown.
    #[must_use]
    pub fn first_free_seat(&self, table_id: &TableId) -> Option<u32> {
        let table = self.tables.get(table_id)?;
        (0..table.capacity).find(|&i| self.occupant(SeatRef::new(*table_id, i)).is_none())
    }

    /// Occupancy per table, in draw order.
    #[must_use]
    pub fn table_summaries(&self) -> Vec<TableSummary> {
        self.sorted_tables()
            .into_iter()
            .map(|t| TableSummary { table_id: t.id, occupied: self.occupied_count(&t.id), capacity: t.capacity })
            .collect()
    }

    // --- Families ---

    #[must_use]
    pub fn families(&self) -> &[Family] {
        &self.families
    }

    /// Unassigned guests grouped by family for the side panel.
    ///
    /// Groups are ordered by family name with the no-family group last. Inside a
    /// group the family head comes first, then guests by surname and name.
    #[must_use]
    pub fn unassigned_by_family(&self) -> Vec<GuestGroup<'_>> {
        let mut families: Vec<&Family> = self.families.iter().collect();
        families.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        let unassigned: Vec<&Guest> = self.guests.values().filter(|g| g.seat.is_none()).collect();
        let known = |id: &FamilyId| self.families.iter().any(|f| f.id == *id);

        let mut groups: Vec<GuestGroup<'_>> = families
            .into_iter()
            .map(|family| GuestGroup {
                family: Some(family),
                guests: unassigned
                    .iter()
                    .copied()
                    .filter(|g| g.family_id == Some(family.id))
                    .collect(),
            })
            .filter(|group| !group.guests.is_empty())
            .collect();

        let orphans: Vec<&Guest> = unassigned
            .iter()
            .copied()
            .filter(|g| !g.family_id.as_ref().is_some_and(known))
            .collect();
        if !orphans.is_empty() {
            groups.push(GuestGroup { family: None, guests: orphans });
        }

        for group in &mut groups {
            group.guests.sort_by(|a, b| {
                b.is_family_head
                    .cmp(&a.is_family_head)
                    .then_with(|| a.surname.cmp(&b.surname))
                    .then_with(|| a.name.cmp(&b.name))
                    .then_with(|| a.id.cmp(&b.id))
            });
        }
        groups
    }
}
