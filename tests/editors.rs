use std::cell::{Cell, RefCell};
use std::rc::Rc;

use floem::kurbo::{Point, Rect, Size};
use floem_gradient::{
    place_popup, ColorPicker, Error, GradientEditor, GradientKind, PickerInput, StopPart,
    StopTrack, Surface,
};

const CANVAS: Size = Size::new(1920.0, 1080.0);
const POPUP: Size = Size::new(232.0, 320.0);
const VIEWPORT: Size = Size::new(800.0, 600.0);

#[test]
fn popup_is_centered_below_the_anchor() {
    let origin = place_popup(Rect::new(300.0, 100.0, 328.0, 128.0), POPUP, VIEWPORT);
    assert_eq!(origin, Point::new(314.0 - 116.0, 138.0));
}

#[test]
fn popup_flips_above_and_clamps_left() {
    let origin = place_popup(Rect::new(100.0, 500.0, 128.0, 528.0), POPUP, VIEWPORT);
    assert_eq!(origin, Point::new(10.0, 170.0));
}

#[test]
fn popup_clamps_to_right_edge() {
    let origin = place_popup(Rect::new(780.0, 10.0, 800.0, 30.0), POPUP, VIEWPORT);
    assert_eq!(origin, Point::new(558.0, 40.0));
}

#[test]
fn picker_cancel_restores_color_from_open() {
    let finals = Rc::new(RefCell::new(Vec::new()));
    let sink = finals.clone();
    let mut picker =
        ColorPicker::new("#3B82F6").on_change(move |c| sink.borrow_mut().push(c.is_final));
    picker.set_surface_rect(Surface::Hue, Rect::new(0.0, 0.0, 200.0, 14.0));

    picker.open();
    picker.handle(PickerInput::PointerDown {
        surface: Surface::Hue,
        pos: Point::new(100.0, 7.0),
    });
    assert!((picker.color().h - 180.0).abs() < 1e-9);
    picker.handle(PickerInput::PointerUp);

    let change = picker.handle(PickerInput::Cancel).expect("cancel emits");
    assert_eq!(change.hex, "#3B82F6");
    assert!(!picker.is_open());
    assert_eq!(*finals.borrow(), vec![false, true]);
}

#[test]
fn picker_closes_on_press_outside_popup_and_trigger() {
    let closed = Rc::new(Cell::new(0));
    let count = closed.clone();
    let mut picker = ColorPicker::new("#FF0000").on_close(move || count.set(count.get() + 1));
    let trigger = Rect::new(20.0, 20.0, 48.0, 48.0);
    picker.set_trigger_rect(Some(trigger));
    picker.open();
    let origin = picker.popup_origin(POPUP, VIEWPORT).expect("trigger mode");
    picker.set_popup_rect(Rect::from_origin_size(origin, POPUP));

    assert!(!picker.pointer_down_outside(Point::new(30.0, 30.0)));
    assert!(!picker.pointer_down_outside(Point::new(origin.x + 5.0, origin.y + 5.0)));
    assert!(picker.is_open());

    assert!(picker.pointer_down_outside(Point::new(700.0, 580.0)));
    assert!(!picker.is_open());
    assert_eq!(closed.get(), 1);
}

#[test]
fn picker_rejects_malformed_text() {
    let mut picker = ColorPicker::new("#112233");
    assert!(picker.handle(PickerInput::HexCommit("112233".into())).is_none());
    assert!(picker.handle(PickerInput::HexCommit("#12345".into())).is_none());
    assert!(picker.handle(PickerInput::AlphaCommit("150".into())).is_none());
    assert_eq!(picker.hex_text(), "#112233");

    let change = picker
        .handle(PickerInput::AlphaCommit("50".into()))
        .expect("valid alpha");
    assert_eq!(change.hexa, "#11223380");
}

#[test]
fn dragged_stop_is_tracked_through_resort() {
    let mut editor = GradientEditor::new(CANVAS);
    editor.add_stop(0.25, Some("#ff0000")).expect("valid color");
    assert_eq!(editor.stops()[1].color, "#FF0000");

    editor.begin_drag(2, 100.0, 100.0);
    let offset = editor.drag_to(10.0).expect("dragging");
    assert!((offset - 0.1).abs() < 1e-9);
    // no re-sort while the pointer is down
    assert_eq!(editor.stops()[2].color, "#FFFFFF");

    assert!(editor.end_drag());
    let colors: Vec<&str> = editor.stops().iter().map(|s| s.color.as_str()).collect();
    assert_eq!(colors, vec!["#000000", "#FFFFFF", "#FF0000"]);
    assert_eq!(editor.active_index(), Some(1));
}

#[test]
fn last_two_stops_cannot_be_deleted() {
    let mut editor = GradientEditor::new(CANVAS);
    editor.select(Some(0));
    assert!(matches!(
        editor.delete_active_stop(),
        Err(Error::MinimumStops { min: 2 })
    ));
    assert_eq!(editor.stops().len(), 2);
}

#[test]
fn stop_picker_previews_while_dragging_and_commits_on_release() {
    let previews = Rc::new(Cell::new(0));
    let changes = Rc::new(Cell::new(0));
    let (p, c) = (previews.clone(), changes.clone());
    let mut editor = GradientEditor::with_stops(CANVAS, &[(0.0, "#000000"), (1.0, "#0000FF")])
        .expect("two stops")
        .on_preview(move |_| p.set(p.get() + 1))
        .on_change(move |_| c.set(c.get() + 1));

    let origin = editor
        .open_stop_picker(1, Rect::new(40.0, 28.0, 54.0, 50.0), POPUP, VIEWPORT)
        .expect("stop exists");
    assert_eq!(origin, Point::new(10.0, 60.0));
    assert_eq!(editor.stop_picker_target(), Some(1));

    if let Some(picker) = editor.stop_picker_mut() {
        picker.set_surface_rect(Surface::SaturationValue, Rect::new(0.0, 0.0, 100.0, 100.0));
    }
    assert!(editor.stop_picker_input(PickerInput::PointerDown {
        surface: Surface::SaturationValue,
        pos: Point::new(100.0, 100.0),
    }));
    assert_eq!(editor.stops()[1].color, "#000000");
    assert_eq!(changes.get(), 0);
    assert!(previews.get() > 0);

    assert!(editor.stop_picker_input(PickerInput::PointerUp));
    assert_eq!(changes.get(), 1);

    editor.stop_picker_input(PickerInput::HexCommit("#00FF00".into()));
    assert_eq!(editor.stops()[1].color, "#00FF00");
    // focus leaving the field re-sends the text it shows
    assert!(!editor.stop_picker_input(PickerInput::HexCommit("#00FF00".into())));
    assert_eq!(changes.get(), 2);
    editor.stop_picker_input(PickerInput::Apply);
    assert!(editor.stop_picker().is_none());
    assert_eq!(changes.get(), 3);
}

#[test]
fn definition_serializes_for_the_renderer() {
    let mut editor = GradientEditor::new(CANVAS);
    let json = serde_json::to_value(editor.definition()).expect("serializable");
    assert_eq!(json["type"], "linear");
    assert_eq!(json["x1"], 0.0);
    assert_eq!(json["y1"], 540.0);
    assert_eq!(json["x2"], 1920.0);
    assert_eq!(json["stops"][1]["color"], "#FFFFFF");

    editor.set_kind(GradientKind::Radial);
    let json = serde_json::to_value(editor.definition()).expect("serializable");
    assert_eq!(json["type"], "radial");
    assert_eq!(json["cx"], 960.0);
    let r = json["r"].as_f64().expect("radius");
    assert!((r - (960.0f64.hypot(540.0))).abs() < 1e-9);
}

#[test]
fn track_hit_test_prefers_active_stop() {
    let editor = GradientEditor::with_stops(CANVAS, &[(0.0, "#000"), (0.5, "#888"), (0.52, "#FFF")])
        .expect("three stops");
    let track = StopTrack::new(Rect::new(0.0, 0.0, 100.0, 28.0));
    let (tab, swatch) = track.handle_rects(0.5);

    let tab_hit = track.hit_test(editor.stops(), None, tab.center());
    assert_eq!(tab_hit, Some((2, StopPart::Tab)));
    let active_hit = track.hit_test(editor.stops(), Some(1), swatch.center());
    assert_eq!(active_hit, Some((1, StopPart::Swatch)));
    assert_eq!(track.hit_test(editor.stops(), None, Point::new(90.0, 14.0)), None);
}
