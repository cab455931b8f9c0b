//! Rendering: draws the full seating scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a read-only view of the engine and produces pixels; it does not
//! mutate any application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::SEAT_RADIUS;
use crate::doc::{Guest, GuestType, SeatRef, SeatingDoc, Table, TableShape};
use crate::engine::EngineCore;
use crate::hit::{Hit, HitPart};
use crate::layout;

/// Selection dash segment length in screen pixels.
const SELECTION_DASH_PX: f64 = 4.0;
/// Gap between a table body and its selection outline, in screen pixels.
const SELECTION_GAP_PX: f64 = 6.0;

const TABLE_FILL: &str = "#F4EDE4";
const TABLE_STROKE: &str = "#8A7563";
const SEAT_EMPTY_FILL: &str = "#FFFFFF";
const SEAT_STROKE: &str = "#B5A595";
const DROP_HIGHLIGHT: &str = "#2E9E5B";
const SELECTION_STROKE: &str = "#1E90FF";
const LABEL_COLOR: &str = "#1F1A17";

/// Draw the full scene: tables, seats, occupants, and selection UI.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, core: &EngineCore) -> Result<(), JsValue> {
    let camera = &core.camera;

    // Layer 1: clear and set up transforms.
    ctx.set_transform(core.dpr, 0.0, 0.0, core.dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, core.viewport_width, core.viewport_height);
    ctx.translate(camera.pan_x, camera.pan_y)?;
    ctx.scale(camera.zoom, camera.zoom)?;

    // Layer 2: tables in draw order, each with its seats on top.
    for table in core.doc.sorted_tables() {
        let target = core.ui.drop_target.filter(|hit| hit.table_id == table.id);
        draw_table(ctx, table, &core.doc, target)?;
    }

    // Layer 3: selection outline.
    if let Some(table) = core.ui.selected_id.and_then(|id| core.doc.table(&id)) {
        draw_selection(ctx, table, camera.zoom)?;
    }

    Ok(())
}

// =============================================================
// Tables
// =============================================================

fn draw_table(
    ctx: &CanvasRenderingContext2d,
    table: &Table,
    doc: &SeatingDoc,
    drop_target: Option<Hit>,
) -> Result<(), JsValue> {
    let (hw, hh) = layout::table_footprint(table);
    let body_targeted = drop_target.is_some_and(|hit| hit.part == HitPart::Body);

    ctx.save();
    translate_and_rotate(ctx, table)?;
    body_path(ctx, table.shape, hw, hh)?;
    ctx.set_fill_style_str(TABLE_FILL);
    ctx.fill();
    ctx.set_stroke_style_str(if body_targeted { DROP_HIGHLIGHT } else { TABLE_STROKE });
    ctx.set_line_width(if body_targeted { 3.0 } else { 1.5 });
    ctx.stroke();
    ctx.restore();

    // Labels stay upright regardless of table rotation.
    let occupied = doc.occupied_count(&table.id);
    ctx.save();
    ctx.set_fill_style_str(LABEL_COLOR);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font("bold 13px sans-serif");
    let name = fit_text_with_ellipsis(ctx, &table.name, (hw * 1.6).max(24.0));
    ctx.fill_text(&name, table.x, table.y - 7.0)?;
    ctx.set_font("11px sans-serif");
    ctx.fill_text(&format!("{occupied}/{}", table.capacity), table.x, table.y + 9.0)?;
    ctx.restore();

    for seat in layout::seat_positions(table) {
        let occupant = doc.occupant(SeatRef::new(table.id, seat.index));
        let targeted = drop_target.is_some_and(|hit| hit.part == HitPart::Seat(seat.index));
        draw_seat(ctx, seat.x, seat.y, occupant, targeted)?;
    }
    Ok(())
}

fn body_path(ctx: &CanvasRenderingContext2d, shape: TableShape, hw: f64, hh: f64) -> Result<(), JsValue> {
    ctx.begin_path();
    match shape {
        TableShape::Round => ctx.arc(0.0, 0.0, hw, 0.0, TAU)?,
        TableShape::RectSingle | TableShape::RectDouble => ctx.rect(-hw, -hh, hw * 2.0, hh * 2.0),
    }
    Ok(())
}

// =============================================================
// Seats
// =============================================================

fn seat_fill(guest: &Guest) -> &'static str {
    match guest.guest_type {
        GuestType::Adult => "#F2C9A0",
        GuestType::Child => "#BFD8F2",
        GuestType::Infant => "#E4CDEB",
    }
}

fn draw_seat(
    ctx: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    occupant: Option<&Guest>,
    targeted: bool,
) -> Result<(), JsValue> {
    ctx.save();
    ctx.begin_path();
    ctx.arc(x, y, SEAT_RADIUS, 0.0, TAU)?;
    ctx.set_fill_style_str(occupant.map_or(SEAT_EMPTY_FILL, seat_fill));
    ctx.fill();
    ctx.set_stroke_style_str(if targeted { DROP_HIGHLIGHT } else { SEAT_STROKE });
    ctx.set_line_width(if targeted { 3.0 } else { 1.0 });
    ctx.stroke();

    if let Some(guest) = occupant {
        ctx.set_fill_style_str(LABEL_COLOR);
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_font("bold 11px sans-serif");
        ctx.fill_text(&guest.initials(), x, y)?;
    }
    ctx.restore();
    Ok(())
}

// =============================================================
// Text
// =============================================================

fn fit_text_with_ellipsis(ctx: &CanvasRenderingContext2d, text: &str, max_w: f64) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if measured_text_width(ctx, trimmed) <= max_w {
        return trimmed.to_owned();
    }

    let ellipsis = "...";
    let mut chars: Vec<char> = trimmed.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate = format!("{}{}", chars.iter().collect::<String>().trim_end(), ellipsis);
        if measured_text_width(ctx, &candidate) <= max_w {
            return candidate;
        }
    }
    ellipsis.to_owned()
}

fn measured_text_width(ctx: &CanvasRenderingContext2d, text: &str) -> f64 {
    match ctx.measure_text(text) {
        Ok(metrics) => metrics.width(),
        Err(_) => f64::INFINITY,
    }
}

// =============================================================
// Selection UI
// =============================================================

fn draw_selection(ctx: &CanvasRenderingContext2d, table: &Table, zoom: f64) -> Result<(), JsValue> {
    let (hw, hh) = layout::table_footprint(table);
    let gap = SELECTION_GAP_PX / zoom;
    let dash_world = SELECTION_DASH_PX / zoom;

    ctx.save();
    translate_and_rotate(ctx, table)?;
    ctx.set_stroke_style_str(SELECTION_STROKE);
    ctx.set_line_width(1.5 / zoom);
    let dash_array = js_sys::Array::new();
    dash_array.push(&dash_world.into());
    dash_array.push(&dash_world.into());
    ctx.set_line_dash(&dash_array)?;

    body_path(ctx, table.shape, hw + gap, hh + gap)?;
    ctx.stroke();

    ctx.set_line_dash(&js_sys::Array::new())?;
    ctx.restore();
    Ok(())
}

// =============================================================
// Helpers
// =============================================================

/// Translate to the table's centre and rotate by its normalized rotation.
fn translate_and_rotate(ctx: &CanvasRenderingContext2d, table: &Table) -> Result<(), JsValue> {
    ctx.translate(table.x, table.y)?;
    ctx.rotate(f64::from(table.display_rotation()).to_radians())?;
    Ok(())
}
