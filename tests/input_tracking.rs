use egui::{Color32, Pos2, Rect, pos2, vec2};
use story_canvas::geometry::CanvasInsets;
use story_canvas::{
    BrushKind, CanvasCommand, CanvasState, InputEvent, InputLocation, InputTracker, ShapeKind,
    StrokeKind, ToolSettings,
};

const INSETS: CanvasInsets = CanvasInsets {
    left: 0.0,
    top: 0.0,
    right: 70.0,
    bottom: 90.0,
};

fn tracker(kind: StrokeKind) -> InputTracker {
    let settings = ToolSettings {
        kind,
        color: Color32::BLUE,
        ..Default::default()
    };
    InputTracker::new(
        settings,
        INSETS,
        Rect::from_min_size(Pos2::ZERO, vec2(400.0, 300.0)),
    )
}

fn at(x: f32, y: f32) -> InputLocation {
    InputLocation {
        position: pos2(x, y),
        is_in_canvas: true,
    }
}

/// Feed a whole gesture and apply whatever command comes out.
fn gesture(tracker: &mut InputTracker, canvas: &mut CanvasState, points: &[(f32, f32)]) {
    let mut events = Vec::new();
    if let Some((&(x, y), rest)) = points.split_first() {
        events.push(InputEvent::PointerDown { location: at(x, y) });
        for &(x, y) in rest {
            events.push(InputEvent::PointerMove { location: at(x, y) });
        }
        let &(x, y) = points.last().unwrap();
        events.push(InputEvent::PointerUp { location: at(x, y) });
    }
    for event in events {
        if let Some(command) = tracker.handle_event(&event, canvas) {
            command.execute(canvas);
        }
    }
}

#[test]
fn completed_gesture_appends_exactly_one_stroke() {
    let mut tracker = tracker(StrokeKind::Brush(BrushKind::Pen));
    let mut canvas = CanvasState::default();

    gesture(&mut tracker, &mut canvas, &[(10.0, 10.0), (20.0, 15.0), (30.0, 30.0)]);

    assert_eq!(canvas.strokes().len(), 1);
    assert_eq!(canvas.strokes()[0].points().len(), 3);
    assert!(canvas.active_stroke().is_none());
}

#[test]
fn tap_without_movement_is_discarded() {
    let mut tracker = tracker(StrokeKind::Brush(BrushKind::Marker));
    let mut canvas = CanvasState::default();

    gesture(&mut tracker, &mut canvas, &[(10.0, 10.0)]);

    assert!(canvas.strokes().is_empty());
    assert!(canvas.active_stroke().is_none());
}

#[test]
fn every_tracked_point_stays_inside_the_inset_canvas() {
    let mut tracker = tracker(StrokeKind::Brush(BrushKind::Brush));
    let mut canvas = CanvasState::default();
    let raw = [
        (-50.0, -50.0),
        (1000.0, 20.0),
        (200.0, 5000.0),
        (f32::MAX, f32::MIN),
        (329.9, 209.9),
        (400.0, 300.0),
    ];

    gesture(&mut tracker, &mut canvas, &raw);

    let bounds = tracker.bounds();
    assert_eq!(bounds, Rect::from_min_max(Pos2::ZERO, pos2(330.0, 210.0)));
    for point in canvas.strokes()[0].points() {
        assert!(bounds.contains(*point), "{point:?} escaped {bounds:?}");
    }
}

#[test]
fn shape_points_are_clamped_too() {
    let mut tracker = tracker(StrokeKind::Shape(ShapeKind::Rectangle));
    let mut canvas = CanvasState::default();

    gesture(&mut tracker, &mut canvas, &[(100.0, 100.0), (900.0, 900.0)]);

    let points = canvas.strokes()[0].points();
    assert_eq!(points[2], pos2(330.0, 210.0));
}

#[test]
fn eraser_paints_with_the_background_color() {
    let mut tracker = tracker(StrokeKind::Brush(BrushKind::Pen));
    tracker.settings_mut().eraser = true;
    let mut canvas = CanvasState::default();
    let paper = Color32::from_rgb(0xff, 0xf8, 0xe7);
    CanvasCommand::SetBackgroundColor(paper).execute(&mut canvas);

    gesture(&mut tracker, &mut canvas, &[(10.0, 10.0), (50.0, 50.0)]);

    assert_eq!(canvas.strokes()[0].color(), paper);
}

#[test]
fn shape_gesture_is_rebuilt_from_the_anchor() {
    let mut tracker = tracker(StrokeKind::Shape(ShapeKind::Rectangle));
    let mut canvas = CanvasState::default();

    gesture(
        &mut tracker,
        &mut canvas,
        &[(10.0, 10.0), (80.0, 90.0), (30.0, 20.0), (50.0, 40.0)],
    );

    assert_eq!(
        canvas.strokes()[0].points(),
        &[
            pos2(10.0, 10.0),
            pos2(50.0, 10.0),
            pos2(50.0, 40.0),
            pos2(10.0, 40.0),
            pos2(10.0, 10.0),
        ]
    );
    assert!(canvas.active_stroke().is_none());
}

#[test]
fn pointer_leave_finishes_the_gesture() {
    let mut tracker = tracker(StrokeKind::Brush(BrushKind::Pen));
    let mut canvas = CanvasState::default();

    tracker.handle_event(&InputEvent::PointerDown { location: at(10.0, 10.0) }, &mut canvas);
    tracker.handle_event(&InputEvent::PointerMove { location: at(40.0, 40.0) }, &mut canvas);
    let command = tracker.handle_event(
        &InputEvent::PointerLeave {
            last_known_location: at(40.0, 40.0),
        },
        &mut canvas,
    );

    assert!(matches!(command, Some(CanvasCommand::AddStroke(_))));
    assert!(canvas.active_stroke().is_none());
}

#[test]
fn stroke_carries_the_tool_settings() {
    let mut tracker = tracker(StrokeKind::Brush(BrushKind::Spray));
    tracker.settings_mut().size = 20.0;
    tracker.settings_mut().opacity = 0.8;
    let mut canvas = CanvasState::default();

    gesture(&mut tracker, &mut canvas, &[(10.0, 10.0), (50.0, 50.0)]);

    let stroke = &canvas.strokes()[0];
    assert_eq!(stroke.kind(), StrokeKind::Brush(BrushKind::Spray));
    assert_eq!(stroke.color(), Color32::BLUE);
    assert_eq!(stroke.size(), 20.0);
    assert_eq!(stroke.opacity(), 0.8);
}
