use super::*;

// =============================================================
// RecordingSurface
// =============================================================

#[test]
fn recording_surface_reports_its_size() {
    let surface = RecordingSurface::new(320.0, 200.0);
    assert_eq!(surface.size(), Size::new(320.0, 200.0));
}

#[test]
fn records_calls_in_order() {
    let mut surface = RecordingSurface::new(100.0, 100.0);
    surface.save();
    surface.begin_path();
    surface.rect(1.0, 2.0, 3.0, 4.0);
    surface.fill();
    surface.restore();
    assert_eq!(
        surface.ops(),
        &[
            DrawOp::Save,
            DrawOp::BeginPath,
            DrawOp::Rect { x: 1.0, y: 2.0, width: 3.0, height: 4.0 },
            DrawOp::FillPath,
            DrawOp::Restore,
        ]
    );
}

#[test]
fn measures_text_by_character_count() {
    let mut surface = RecordingSurface::new(100.0, 100.0).with_char_width(10.0);
    assert_eq!(surface.measure_text("abcd").map(|m| m.width).unwrap(), 40.0);
    assert_eq!(surface.measure_text("✕").map(|m| m.width).unwrap(), 10.0);
}

#[test]
fn texts_collects_fill_and_stroke_text() {
    let mut surface = RecordingSurface::new(100.0, 100.0);
    surface.fill_text("one", 0.0, 0.0, None).unwrap();
    surface.rect(0.0, 0.0, 1.0, 1.0);
    surface.stroke_text("two", 0.0, 0.0, Some(50.0)).unwrap();
    assert_eq!(surface.texts(), vec!["one", "two"]);
}

#[test]
fn cursor_tracks_last_set_value() {
    let mut surface = RecordingSurface::new(100.0, 100.0);
    assert_eq!(surface.cursor(), "default");
    surface.set_cursor("pointer");
    assert_eq!(surface.cursor(), "pointer");
}

#[test]
fn clear_ops_empties_the_log() {
    let mut surface = RecordingSurface::new(100.0, 100.0);
    surface.save();
    surface.clear_ops();
    assert!(surface.ops().is_empty());
}

// =============================================================
// ManualScheduler
// =============================================================

#[test]
fn request_frame_issues_increasing_handles() {
    let mut scheduler = ManualScheduler::new();
    let a = scheduler.request_frame().unwrap();
    let b = scheduler.request_frame().unwrap();
    assert_ne!(a, b);
    assert_eq!(scheduler.pending(), Some(b));
}

#[test]
fn take_pending_consumes_the_request() {
    let mut scheduler = ManualScheduler::new();
    let handle = scheduler.request_frame().unwrap();
    assert_eq!(scheduler.take_pending(), Some(handle));
    assert_eq!(scheduler.pending(), None);
}

#[test]
fn cancel_clears_matching_pending_request() {
    let mut scheduler = ManualScheduler::new();
    let handle = scheduler.request_frame().unwrap();
    scheduler.cancel_frame(handle);
    assert_eq!(scheduler.pending(), None);
    assert_eq!(scheduler.cancelled(), &[handle]);
}

#[test]
fn cancel_of_stale_handle_keeps_pending() {
    let mut scheduler = ManualScheduler::new();
    let old = scheduler.request_frame().unwrap();
    let new = scheduler.request_frame().unwrap();
    scheduler.cancel_frame(old);
    assert_eq!(scheduler.pending(), Some(new));
}
