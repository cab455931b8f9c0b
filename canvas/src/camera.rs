#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{MAX_ZOOM, MIN_FIT_EXTENT, MIN_ZOOM};
use crate::layout::Bounds;

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Camera state for pan/zoom on the seating canvas.
///
/// `pan_x` / `pan_y` are in CSS pixels.
/// `zoom` is a scale factor (1.0 = no zoom), kept within [`MIN_ZOOM`, `MAX_ZOOM`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Shift the pan offset by a raw screen-space delta. Zoom does not scale it.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Set a new zoom level while keeping the world point under `anchor` fixed on screen.
    pub fn zoom_about(&mut self, anchor: Point, zoom: f64) {
        let world = self.screen_to_world(anchor);
        self.zoom = clamp_zoom(zoom);
        self.pan_x = anchor.x - world.x * self.zoom;
        self.pan_y = anchor.y - world.y * self.zoom;
    }
}

/// Clamp a zoom factor into the supported range. Infinities clamp to the
/// nearer bound; NaN falls back to 1.0.
#[must_use]
pub fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() {
        1.0
    } else {
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    }
}

/// Compute a camera that shows `bounds` centred in a `canvas_w` × `canvas_h` viewport.
///
/// The zoom is the largest that fits both axes, capped at `max_zoom` and clamped to the
/// supported zoom range. Degenerate boxes are widened to [`MIN_FIT_EXTENT`] first.
#[must_use]
pub fn fit_zoom_and_pan(bounds: Bounds, canvas_w: f64, canvas_h: f64, max_zoom: f64) -> Camera {
    let width = bounds.width().max(MIN_FIT_EXTENT);
    let height = bounds.height().max(MIN_FIT_EXTENT);
    let canvas_w = canvas_w.max(MIN_FIT_EXTENT);
    let canvas_h = canvas_h.max(MIN_FIT_EXTENT);

    let zoom = clamp_zoom((canvas_w / width).min(canvas_h / height).min(max_zoom));
    let center = bounds.center();

    Camera {
        pan_x: canvas_w * 0.5 - center.x * zoom,
        pan_y: canvas_h * 0.5 - center.y * zoom,
        zoom,
    }
}
