use super::*;
use crate::layout::model::{
    AspectRatio, Decoration, DecorationKind, TemplateFamily, TextElement, Texture,
};

fn text(x: f64, y: f64) -> TextElement {
    TextElement {
        bounds: PlacedBox::new(x, y, 300.0, 60.0).draggable(),
        font_size: 40.0,
        color: "#000000".to_owned(),
    }
}

fn layout() -> Layout {
    Layout {
        ratio: AspectRatio::Square,
        width: 1080,
        height: 1080,
        template: TemplateFamily::CleanMinimal,
        background: "#ffffff".to_owned(),
        background_texture: Texture::None,
        packshot: PlacedBox::new(540.0, 540.0, 200.0, 200.0).draggable(),
        logo: PlacedBox::new(10.0, 10.0, 50.0, 50.0).draggable(),
        headline: text(100.0, 800.0),
        cta: text(100.0, 900.0),
        additional_text: None,
        decorations: vec![
            Decoration::shape(
                DecorationKind::Circle,
                PlacedBox::new(900.0, 100.0, 60.0, 60.0),
                "#ff0000",
            ),
            Decoration::shape(
                DecorationKind::Circle,
                PlacedBox::new(900.0, 300.0, 60.0, 60.0),
                "#00ff00",
            ),
        ],
    }
}

fn key(key: Key) -> InputEvent {
    InputEvent::KeyDown {
        key,
        focus: Focus::Canvas,
    }
}

#[test]
fn scale_fits_width_under_max_height() {
    let opts = ViewportOpts::default();
    assert_eq!(opts.max_height, 600.0);
    assert_eq!(viewport_scale(540.0, AspectRatio::Square.canvas(), &opts), 0.5);
    assert_eq!(
        viewport_scale(540.0, AspectRatio::Vertical.canvas(), &opts),
        600.0 / 1920.0
    );
}

#[test]
fn container_resize_sets_scale_used_for_pointer_mapping() {
    let mut l = layout();
    let mut s = EditorState::default();
    assert_eq!(s.scale(), 1.0);
    s.handle(&mut l, InputEvent::ContainerResized { width: 540.0 });
    assert_eq!(s.scale(), 0.5);

    // Screen (270, 270) is canvas (540, 540): the packshot center.
    let out = s.handle(&mut l, InputEvent::PointerDown(Point::new(270.0, 270.0)));
    assert!(out.overlay_changed && !out.layout_changed);
    assert_eq!(s.selection(), Some(ElementRef::Packshot));
    assert!(matches!(s.drag(), DragState::Dragging { .. }));

    let out = s.handle(&mut l, InputEvent::PointerMove(Point::new(280.0, 265.0)));
    assert!(out.layout_changed);
    assert_eq!((l.packshot.x, l.packshot.y), (560.0, 530.0));

    s.handle(&mut l, InputEvent::PointerUp);
    assert_eq!(*s.drag(), DragState::Idle);
    assert_eq!(s.selection(), Some(ElementRef::Packshot));
}

#[test]
fn fit_canvas_reuses_container_width() {
    let l = layout();
    let mut s = EditorState::default();
    s.fit_canvas(l.canvas());
    assert_eq!(s.scale(), 1.0);
    let mut l2 = l.clone();
    s.handle(&mut l2, InputEvent::ContainerResized { width: 540.0 });
    s.fit_canvas(AspectRatio::Vertical.canvas());
    assert_eq!(s.scale(), 600.0 / 1920.0);
}

#[test]
fn idle_moves_update_hover_only_on_change() {
    let mut l = layout();
    let mut s = EditorState::default();
    let out = s.handle(&mut l, InputEvent::PointerMove(Point::new(30.0, 30.0)));
    assert_eq!(out, EventOutcome::OVERLAY);
    assert_eq!(s.hovered(), Some(ElementRef::Logo));
    let out = s.handle(&mut l, InputEvent::PointerMove(Point::new(31.0, 30.0)));
    assert_eq!(out, EventOutcome::NONE);

    s.handle(&mut l, InputEvent::PointerLeave);
    assert_eq!(s.hovered(), None);
}

#[test]
fn leaving_the_canvas_ends_a_drag() {
    let mut l = layout();
    let mut s = EditorState::default();
    s.handle(&mut l, InputEvent::PointerDown(Point::new(30.0, 30.0)));
    assert_eq!(s.drag().target(), Some(ElementRef::Logo));
    s.handle(&mut l, InputEvent::PointerLeave);
    assert_eq!(*s.drag(), DragState::Idle);

    // Further moves only hover.
    let before = l.clone();
    s.handle(&mut l, InputEvent::PointerMove(Point::new(300.0, 300.0)));
    assert_eq!(l, before);
}

#[test]
fn corner_press_resizes_from_anchor() {
    let mut l = layout();
    let mut s = EditorState::default();
    s.handle(&mut l, InputEvent::PointerDown(Point::new(640.0, 640.0)));
    assert!(matches!(
        s.drag(),
        DragState::Resizing {
            handle: ResizeHandle::BottomRight,
            ..
        }
    ));
    s.handle(&mut l, InputEvent::PointerMove(Point::new(540.0, 700.0)));
    assert_eq!((l.packshot.width, l.packshot.height), (100.0, 260.0));
    assert_eq!((l.packshot.x, l.packshot.y), (540.0, 540.0));
}

#[test]
fn dragging_a_decoration_keeps_it_on_canvas() {
    let mut l = layout();
    let mut s = EditorState::default();
    s.handle(&mut l, InputEvent::PointerDown(Point::new(900.0, 100.0)));
    s.handle(&mut l, InputEvent::PointerMove(Point::new(2000.0, -400.0)));
    assert_eq!((l.decorations[0].bounds.x, l.decorations[0].bounds.y), (1050.0, 30.0));
}

#[test]
fn arrow_keys_rotate_selected_decoration() {
    let mut l = layout();
    let mut s = EditorState::default();
    s.handle(&mut l, InputEvent::PointerDown(Point::new(900.0, 300.0)));
    s.handle(&mut l, InputEvent::PointerUp);

    assert!(s.handle(&mut l, key(Key::ArrowRight)).layout_changed);
    assert_eq!(l.decorations[1].rotation, Some(5.0));
    s.handle(&mut l, key(Key::ArrowLeft));
    s.handle(&mut l, key(Key::ArrowLeft));
    assert_eq!(l.decorations[1].rotation, Some(-5.0));
    assert_eq!(s.handle(&mut l, key(Key::Other)), EventOutcome::NONE);
}

#[test]
fn keys_are_ignored_while_typing() {
    let mut l = layout();
    let mut s = EditorState::default();
    s.select(Some(ElementRef::Decoration(0)));
    let out = s.handle(
        &mut l,
        InputEvent::KeyDown {
            key: Key::Delete,
            focus: Focus::TextInput,
        },
    );
    assert_eq!(out, EventOutcome::NONE);
    assert_eq!(l.decorations.len(), 2);
}

#[test]
fn delete_removes_decoration_and_clears_selection() {
    let mut l = layout();
    let mut s = EditorState::default();
    s.select(Some(ElementRef::Decoration(0)));
    let out = s.handle(&mut l, key(Key::Backspace));
    assert!(out.layout_changed);
    assert_eq!(s.selection(), None);
    assert_eq!(l.decorations.len(), 1);
    assert_eq!(l.decorations[0].color, "#00ff00");
}

#[test]
fn delete_on_main_element_only_deselects() {
    let mut l = layout();
    let mut s = EditorState::default();
    s.select(Some(ElementRef::Headline));
    let before = l.clone();
    let out = s.handle(&mut l, key(Key::Delete));
    assert_eq!(out, EventOutcome::OVERLAY);
    assert_eq!(s.selection(), None);
    assert_eq!(l, before);
}

#[test]
fn keys_without_selection_do_nothing() {
    let mut l = layout();
    let mut s = EditorState::default();
    assert_eq!(s.handle(&mut l, key(Key::Delete)), EventOutcome::NONE);
    assert_eq!(s.handle(&mut l, key(Key::ArrowLeft)), EventOutcome::NONE);
}

#[test]
fn pressing_empty_canvas_keeps_selection() {
    let mut l = layout();
    let mut s = EditorState::default();
    s.select(Some(ElementRef::Cta));
    s.handle(&mut l, InputEvent::PointerDown(Point::new(700.0, 50.0)));
    assert_eq!(s.selection(), Some(ElementRef::Cta));
    assert_eq!(*s.drag(), DragState::Idle);
}

#[test]
fn key_names_map_to_keys() {
    assert_eq!(Key::from_name("Backspace"), Key::Backspace);
    assert_eq!(Key::from_name("ArrowRight"), Key::ArrowRight);
    assert_eq!(Key::from_name("a"), Key::Other);
}
