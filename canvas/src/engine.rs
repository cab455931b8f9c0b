use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{self, Camera, Point};
use crate::consts::{
    CLICK_SLOP_PX, FIT_MAX_ZOOM, FIT_PADDING, MOVE_COMMIT_THRESHOLD, ROTATION_STEP_DEG, WHEEL_ZOOM_RATE, ZOOM_STEP,
};
use crate::doc::{GuestId, SeatRef, SeatingDoc, Snapshot, Table, TableId};
use crate::hit::{self, Hit, HitPart};
use crate::input::{Button, InputState, Key, Modifiers, UiState, WheelDelta};
use crate::layout;
use crate::render;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
///
/// Only `TableMoved`, `TableRotated`, `GuestDropped`, and `DeleteTableRequested`
/// need persisting; the rest are view hints.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A table drag ended more than [`MOVE_COMMIT_THRESHOLD`] away from where it started.
    /// The local document already holds `to`.
    TableMoved { id: TableId, from: Point, to: Point },
    /// A table was rotated. The local document already holds `to`.
    TableRotated { id: TableId, from: i32, to: i32 },
    /// A guest chip was released over a seat.
    GuestDropped { guest_id: GuestId, seat: SeatRef },
    /// A guest chip was released away from any seat; nothing changes.
    GuestDragCancelled { guest_id: GuestId },
    /// The user asked to delete the selected table. The document is untouched.
    DeleteTableRequested { id: TableId },
    SelectionChanged(Option<TableId>),
    SetCursor(String),
    RenderNeeded,
}

impl Action {
    /// Whether this action carries a mutation that must reach the store.
    #[must_use]
    pub fn is_commit(&self) -> bool {
        matches!(
            self,
            Self::TableMoved { .. } | Self::TableRotated { .. } | Self::GuestDropped { .. } | Self::DeleteTableRequested { .. }
        )
    }
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub doc: SeatingDoc,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            doc: SeatingDoc::new(),
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Hydrate the document from a store snapshot.
    pub fn load_snapshot(&mut self, snapshot: Snapshot) -> Vec<Action> {
        self.doc.load_snapshot(snapshot);
        let mut actions = self.reconcile();
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Apply a remote or rolled-back table value.
    pub fn apply_table(&mut self, table: Table) -> Vec<Action> {
        self.doc.insert_table(table);
        vec![Action::RenderNeeded]
    }

    /// Apply a remote table deletion.
    pub fn apply_table_removed(&mut self, id: &TableId) -> Vec<Action> {
        self.doc.remove_table(id);
        let mut actions = self.reconcile();
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Drop UI state that points at records the document no longer holds.
    ///
    /// Called after any change that did not come from this engine's own gestures
    /// (snapshot loads, rollbacks, remote deletes).
    pub fn reconcile(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();

        if let Some(id) = self.ui.selected_id {
            if self.doc.table(&id).is_none() {
                self.ui.selected_id = None;
                actions.push(Action::SelectionChanged(None));
            }
        }

        let stale = match &self.input {
            InputState::DraggingTable { id, .. } => self.doc.table(id).is_none(),
            InputState::DraggingGuest { guest_id } => self.doc.guest(guest_id).is_none(),
            InputState::Idle | InputState::Panning { .. } => false,
        };
        if stale {
            self.input = InputState::Idle;
            self.ui.drop_target = None;
            actions.push(Action::SetCursor("default".into()));
        }

        if let Some(target) = self.ui.drop_target {
            if self.doc.table(&target.table_id).is_none() {
                self.ui.drop_target = None;
            }
        }

        actions
    }

    // --- Viewport ---

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css.max(0.0);
        self.viewport_height = height_css.max(0.0);
        self.dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    }

    fn viewport_center(&self) -> Point {
        Point::new(self.viewport_width * 0.5, self.viewport_height * 0.5)
    }

    /// Set the zoom level, keeping the viewport centre fixed.
    pub fn set_zoom(&mut self, zoom: f64) -> Vec<Action> {
        self.camera.zoom_about(self.viewport_center(), zoom);
        vec![Action::RenderNeeded]
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.set_zoom(self.camera.zoom * ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.set_zoom(self.camera.zoom / ZOOM_STEP)
    }

    /// Fit every table into the viewport. With no tables the camera returns to identity.
    ///
    /// Used for the first-load auto-fit and for the reset-view button.
    pub fn fit_to_tables(&mut self) -> Vec<Action> {
        self.camera = match layout::bounding_box(self.doc.sorted_tables(), FIT_PADDING) {
            Some(bounds) => camera::fit_zoom_and_pan(bounds, self.viewport_width, self.viewport_height, FIT_MAX_ZOOM),
            None => Camera::default(),
        };
        vec![Action::RenderNeeded]
    }

    // --- Input events ---

    /// Start a gesture. Ignored while another gesture is active.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }

        match button {
            Button::Middle => self.start_pan(screen_pt),
            Button::Secondary => Vec::new(),
            Button::Primary => {
                let world = self.camera.screen_to_world(screen_pt);
                match hit::hit_test(world, &self.doc, &self.camera) {
                    Some(Hit { table_id, part: HitPart::Body }) => self.start_table_drag(table_id, world),
                    Some(hit @ Hit { part: HitPart::Seat(_), .. }) => {
                        let occupant = hit
                            .seat()
                            .and_then(|seat| self.doc.occupant(seat))
                            .map(|g| g.id);
                        match occupant {
                            Some(guest_id) => self.begin_guest_drag(guest_id),
                            None => self.start_pan(screen_pt),
                        }
                    }
                    None => self.start_pan(screen_pt),
                }
            }
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        match &mut self.input {
            InputState::Idle => Vec::new(),
            InputState::Panning { last_screen, .. } => {
                let dx = screen_pt.x - last_screen.x;
                let dy = screen_pt.y - last_screen.y;
                *last_screen = screen_pt;
                self.camera.pan_by(dx, dy);
                vec![Action::RenderNeeded]
            }
            InputState::DraggingTable { id, grab_offset, .. } => {
                let (id, grab) = (*id, *grab_offset);
                let world = self.camera.screen_to_world(screen_pt);
                if self.doc.set_table_position(&id, world.x - grab.x, world.y - grab.y) {
                    vec![Action::RenderNeeded]
                } else {
                    self.input = InputState::Idle;
                    vec![Action::SetCursor("default".into())]
                }
            }
            InputState::DraggingGuest { .. } => {
                let world = self.camera.screen_to_world(screen_pt);
                self.ui.drop_target = hit::hit_test(world, &self.doc, &self.camera);
                vec![Action::RenderNeeded]
            }
        }
    }

    /// End the active gesture at `screen_pt`.
    pub fn on_pointer_up(&mut self, screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        self.finish_gesture(screen_pt, true)
    }

    /// The pointer left the canvas. This ends the active gesture like a release,
    /// except that a guest chip carried off the canvas is never dropped.
    pub fn on_pointer_leave(&mut self, screen_pt: Point) -> Vec<Action> {
        self.finish_gesture(screen_pt, false)
    }

    /// Wheel with ctrl/meta zooms about the pointer; a plain wheel pans by the scroll delta.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.zoom() {
            let zoom = self.camera.zoom * (-delta.dy * WHEEL_ZOOM_RATE).exp();
            self.camera.zoom_about(screen_pt, zoom);
        } else {
            self.camera.pan_by(-delta.dx, -delta.dy);
        }
        vec![Action::RenderNeeded]
    }

    /// Keyboard shortcuts: `r`/`R` rotate, `Delete`/`Backspace` delete, `+`/`-` zoom, `0` fit.
    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        match key.0.as_str() {
            "r" if !modifiers.shift => self.rotate_selected(ROTATION_STEP_DEG),
            "R" | "r" => self.rotate_selected(-ROTATION_STEP_DEG),
            "Delete" | "Backspace" => self.delete_selected(),
            "+" | "=" => self.zoom_in(),
            "-" => self.zoom_out(),
            "0" => self.fit_to_tables(),
            _ => Vec::new(),
        }
    }

    // --- Guest drag (drag-source protocol) ---

    /// Start carrying `guest_id`, e.g. from the unassigned-guest panel. Only allowed from idle.
    pub fn begin_guest_drag(&mut self, guest_id: GuestId) -> Vec<Action> {
        if !self.input.is_idle() || self.doc.guest(&guest_id).is_none() {
            return Vec::new();
        }
        self.input = InputState::DraggingGuest { guest_id };
        vec![Action::SetCursor("grabbing".into()), Action::RenderNeeded]
    }

    /// Abandon a guest drag that ended outside the canvas.
    pub fn cancel_guest_drag(&mut self) -> Vec<Action> {
        let InputState::DraggingGuest { guest_id } = self.input else {
            return Vec::new();
        };
        self.input = InputState::Idle;
        self.ui.drop_target = None;
        vec![
            Action::GuestDragCancelled { guest_id },
            Action::SetCursor("default".into()),
            Action::RenderNeeded,
        ]
    }

    // --- Selection-scoped actions ---

    /// Select a table (or clear the selection). Unknown ids clear it.
    pub fn select_table(&mut self, id: Option<TableId>) -> Vec<Action> {
        let id = id.filter(|id| self.doc.table(id).is_some());
        if self.ui.selected_id == id {
            return Vec::new();
        }
        self.ui.selected_id = id;
        vec![Action::SelectionChanged(id), Action::RenderNeeded]
    }

    /// Add `delta` degrees to the selected table's stored rotation.
    pub fn rotate_selected(&mut self, delta: i32) -> Vec<Action> {
        let Some(id) = self.ui.selected_id else {
            return Vec::new();
        };
        let Some(from) = self.doc.table(&id).map(|t| t.rotation) else {
            return Vec::new();
        };
        let to = from
            .checked_add(delta)
            .unwrap_or_else(|| layout::normalize_rotation(from) + delta);
        self.doc.set_table_rotation(&id, to);
        vec![Action::TableRotated { id, from, to }, Action::RenderNeeded]
    }

    /// Ask the host to delete the selected table.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        match self.ui.selected_id {
            Some(id) if self.doc.table(&id).is_some() => vec![Action::DeleteTableRequested { id }],
            _ => Vec::new(),
        }
    }

    // --- Queries ---

    /// The currently selected table, if any.
    #[must_use]
    pub fn selection(&self) -> Option<TableId> {
        self.ui.selected_id
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// The active gesture.
    #[must_use]
    pub fn mode(&self) -> &InputState {
        &self.input
    }

    /// Look up a table by ID.
    #[must_use]
    pub fn table(&self, id: &TableId) -> Option<&Table> {
        self.doc.table(id)
    }

    // --- Gesture internals ---

    fn start_pan(&mut self, screen_pt: Point) -> Vec<Action> {
        self.input = InputState::Panning { last_screen: screen_pt, origin_screen: screen_pt };
        vec![Action::SetCursor("grabbing".into())]
    }

    fn start_table_drag(&mut self, id: TableId, world: Point) -> Vec<Action> {
        let Some(table) = self.doc.table(&id) else {
            return Vec::new();
        };
        let origin = Point::new(table.x, table.y);
        self.input = InputState::DraggingTable {
            id,
            grab_offset: Point::new(world.x - origin.x, world.y - origin.y),
            origin,
        };
        vec![Action::SetCursor("grabbing".into())]
    }

    fn finish_gesture(&mut self, screen_pt: Point, released: bool) -> Vec<Action> {
        let state = std::mem::take(&mut self.input);
        let mut actions = match state {
            InputState::Idle => return Vec::new(),
            InputState::Panning { origin_screen, .. } => {
                if origin_screen.distance(screen_pt) <= CLICK_SLOP_PX {
                    self.select_table(None)
                } else {
                    Vec::new()
                }
            }
            InputState::DraggingTable { id, origin, .. } => self.finish_table_drag(id, origin),
            InputState::DraggingGuest { guest_id } => {
                self.ui.drop_target = None;
                let target = if released { self.drop_target_at(screen_pt) } else { None };
                match target {
                    Some(seat) => vec![Action::GuestDropped { guest_id, seat }],
                    None => vec![Action::GuestDragCancelled { guest_id }],
                }
            }
        };
        actions.push(Action::SetCursor("default".into()));
        actions.push(Action::RenderNeeded);
        actions
    }

    fn finish_table_drag(&mut self, id: TableId, origin: Point) -> Vec<Action> {
        let Some(to) = self.doc.table(&id).map(|t| Point::new(t.x, t.y)) else {
            return Vec::new();
        };
        if origin.distance(to) > MOVE_COMMIT_THRESHOLD {
            return vec![Action::TableMoved { id, from: origin, to }];
        }
        // A click: put back any sub-threshold jitter and select.
        self.doc.set_table_position(&id, origin.x, origin.y);
        self.ui.selected_id = Some(id);
        vec![Action::SelectionChanged(Some(id))]
    }

    /// Seat under `screen_pt`; a drop on a table body takes its first free seat.
    fn drop_target_at(&self, screen_pt: Point) -> Option<SeatRef> {
        let world = self.camera.screen_to_world(screen_pt);
        let hit = hit::hit_test(world, &self.doc, &self.camera)?;
        match hit.part {
            HitPart::Seat(index) => Some(SeatRef::new(hit.table_id, index)),
            HitPart::Body => self
                .doc
                .first_free_seat(&hit.table_id)
                .map(|index| SeatRef::new(hit.table_id, index)),
        }
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    /// Update viewport dimensions and resize the canvas backing store to match.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
        self.canvas
            .set_width((self.core.viewport_width * self.core.dpr).round() as u32);
        self.canvas
            .set_height((self.core.viewport_height * self.core.dpr).round() as u32);
    }

    pub fn load_snapshot(&mut self, snapshot: Snapshot) -> Vec<Action> {
        self.core.load_snapshot(snapshot)
    }

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_pointer_leave(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_leave(screen_pt)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        render::draw(&ctx, &self.core)
    }
}
