use uuid::Uuid;

use super::*;
use crate::doc::{Table, TableShape};

fn table_at(shape: TableShape, capacity: u32, x: f64, y: f64) -> Table {
    Table { id: Uuid::new_v4(), name: "T".into(), shape, capacity, x, y, rotation: 0 }
}

fn doc_with(tables: &[Table]) -> SeatingDoc {
    let mut doc = SeatingDoc::new();
    for t in tables {
        doc.insert_table(t.clone());
    }
    doc
}

#[test]
fn empty_space_misses() {
    let doc = doc_with(&[table_at(TableShape::Round, 4, 0.0, 0.0)]);
    assert!(hit_test(Point::new(1000.0, 1000.0), &doc, &Camera::default()).is_none());
}

#[test]
fn table_centre_hits_body() {
    let t = table_at(TableShape::RectDouble, 8, 100.0, 100.0);
    let doc = doc_with(std::slice::from_ref(&t));
    let hit = hit_test(Point::new(100.0, 100.0), &doc, &Camera::default());
    assert_eq!(hit, Some(Hit { table_id: t.id, part: HitPart::Body }));
    assert_eq!(hit.and_then(|h| h.seat()), None);
}

#[test]
fn seat_centre_hits_seat() {
    let t = table_at(TableShape::Round, 6, 0.0, 0.0);
    let doc = doc_with(std::slice::from_ref(&t));
    for seat in layout::seat_positions(&t) {
        let hit = hit_test(seat.point(), &doc, &Camera::default());
        assert_eq!(hit, Some(Hit { table_id: t.id, part: HitPart::Seat(seat.index) }));
        assert_eq!(hit.and_then(|h| h.seat()), Some(SeatRef::new(t.id, seat.index)));
    }
}

#[test]
fn seat_slop_grows_when_zoomed_out() {
    let t = table_at(TableShape::Round, 4, 0.0, 0.0);
    let doc = doc_with(std::slice::from_ref(&t));
    let seat = layout::seat_positions(&t)[0];
    // Just above seat 0, past the drawn radius.
    let outside = Point::new(seat.x, seat.y - SEAT_RADIUS - 10.0);

    let near = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 2.0 };
    assert!(hit_test(outside, &doc, &near).is_none());

    let far = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 0.25 };
    assert_eq!(hit_test(outside, &doc, &far).map(|h| h.part), Some(HitPart::Seat(0)));
}

#[test]
fn topmost_table_wins_overlap() {
    let a = table_at(TableShape::Round, 4, 0.0, 0.0);
    let b = table_at(TableShape::Round, 4, 10.0, 0.0);
    let doc = doc_with(&[a.clone(), b.clone()]);
    let top = if a.id > b.id { a.id } else { b.id };
    let hit = hit_test(Point::new(5.0, 0.0), &doc, &Camera::default());
    assert_eq!(hit.map(|h| h.table_id), Some(top));
}

#[test]
fn rotated_rect_body_follows_rotation() {
    let mut t = table_at(TableShape::RectSingle, 10, 0.0, 0.0);
    t.rotation = 90;
    let doc = doc_with(std::slice::from_ref(&t));
    assert!(hit_test(Point::new(0.0, 200.0), &doc, &Camera::default()).is_some());
    assert!(hit_test(Point::new(200.0, 0.0), &doc, &Camera::default()).is_none());
}
