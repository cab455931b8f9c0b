#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;
use crate::consts::{MAX_ZOOM, MIN_ZOOM};

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn bounds(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Bounds {
    Bounds { min_x, min_y, max_x, max_y }
}

// --- Point ---

#[test]
fn point_distance_is_euclidean() {
    assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
}

#[test]
fn point_distance_is_symmetric() {
    let a = Point::new(-2.0, 7.5);
    let b = Point::new(11.0, -1.0);
    assert!(approx_eq(a.distance(b), b.distance(a)));
}

// --- Camera defaults ---

#[test]
fn camera_default_is_identity() {
    let cam = Camera::default();
    assert_eq!(cam.pan_x, 0.0);
    assert_eq!(cam.pan_y, 0.0);
    assert_eq!(cam.zoom, 1.0);
}

#[test]
fn identity_screen_to_world_is_noop() {
    let cam = Camera::default();
    let p = Point::new(123.0, -45.0);
    assert!(point_approx_eq(cam.screen_to_world(p), p));
}

// --- Conversions ---

#[test]
fn screen_to_world_undoes_pan_and_zoom() {
    let cam = Camera { pan_x: 100.0, pan_y: 50.0, zoom: 2.0 };
    let world = cam.screen_to_world(Point::new(300.0, 250.0));
    assert!(point_approx_eq(world, Point::new(100.0, 100.0)));
}

#[test]
fn world_screen_round_trip() {
    let cam = Camera { pan_x: -37.5, pan_y: 12.25, zoom: 0.6 };
    for p in [Point::new(0.0, 0.0), Point::new(812.0, -33.0), Point::new(-1e4, 1e4)] {
        let back = cam.screen_to_world(cam.world_to_screen(p));
        assert!((back.x - p.x).abs() < 1e-6 && (back.y - p.y).abs() < 1e-6);
    }
}

#[test]
fn screen_dist_scales_with_zoom() {
    let cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 2.0 };
    assert_eq!(cam.screen_dist_to_world(10.0), 5.0);
}

// --- Pan ---

#[test]
fn pan_by_is_not_scaled_by_zoom() {
    let mut cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 2.5 };
    cam.pan_by(10.0, -4.0);
    assert_eq!(cam.pan_x, 10.0);
    assert_eq!(cam.pan_y, -4.0);
}

#[test]
fn pan_moves_world_point_by_delta_over_zoom() {
    let mut cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 2.0 };
    let screen = Point::new(200.0, 200.0);
    let before = cam.screen_to_world(screen);
    cam.pan_by(20.0, 0.0);
    let after = cam.screen_to_world(screen);
    assert!(approx_eq(before.x - after.x, 10.0));
}

// --- Zoom ---

#[test]
fn zoom_about_keeps_anchor_fixed() {
    let mut cam = Camera { pan_x: 40.0, pan_y: -10.0, zoom: 1.0 };
    let anchor = Point::new(320.0, 240.0);
    let world_before = cam.screen_to_world(anchor);
    cam.zoom_about(anchor, 2.0);
    assert_eq!(cam.zoom, 2.0);
    assert!(point_approx_eq(cam.screen_to_world(anchor), world_before));
}

#[test]
fn zoom_about_clamps_high() {
    let mut cam = Camera::default();
    cam.zoom_about(Point::new(0.0, 0.0), 50.0);
    assert_eq!(cam.zoom, MAX_ZOOM);
}

#[test]
fn zoom_about_clamps_low() {
    let mut cam = Camera::default();
    cam.zoom_about(Point::new(0.0, 0.0), 0.001);
    assert_eq!(cam.zoom, MIN_ZOOM);
}

#[test]
fn clamp_zoom_handles_non_finite() {
    assert_eq!(clamp_zoom(f64::NAN), 1.0);
    assert_eq!(clamp_zoom(f64::INFINITY), MAX_ZOOM);
    assert_eq!(clamp_zoom(f64::NEG_INFINITY), MIN_ZOOM);
    assert_eq!(clamp_zoom(0.0), MIN_ZOOM);
    assert_eq!(clamp_zoom(1.7), 1.7);
}

// --- Fit ---

#[test]
fn fit_centres_bounds_in_canvas() {
    let cam = fit_zoom_and_pan(bounds(0.0, 0.0, 400.0, 200.0), 800.0, 600.0, 1.5);
    let centre = cam.world_to_screen(Point::new(200.0, 100.0));
    assert!(point_approx_eq(centre, Point::new(400.0, 300.0)));
}

#[test]
fn fit_uses_tighter_axis() {
    let cam = fit_zoom_and_pan(bounds(0.0, 0.0, 1000.0, 200.0), 800.0, 600.0, 3.0);
    assert!(approx_eq(cam.zoom, 0.8));
}

#[test]
fn fit_caps_zoom_at_max() {
    let cam = fit_zoom_and_pan(bounds(0.0, 0.0, 10.0, 10.0), 800.0, 600.0, 1.5);
    assert_eq!(cam.zoom, 1.5);
}

#[test]
fn fit_degenerate_bounds_stays_finite() {
    let cam = fit_zoom_and_pan(bounds(5.0, 5.0, 5.0, 5.0), 800.0, 600.0, 1.5);
    assert!(cam.zoom.is_finite() && cam.pan_x.is_finite() && cam.pan_y.is_finite());
    assert!(cam.zoom >= MIN_ZOOM && cam.zoom <= MAX_ZOOM);
}

#[test]
fn fit_huge_bounds_clamps_to_min_zoom() {
    let cam = fit_zoom_and_pan(bounds(-1e6, -1e6, 1e6, 1e6), 800.0, 600.0, 1.5);
    assert_eq!(cam.zoom, MIN_ZOOM);
}
