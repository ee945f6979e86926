use super::*;
use crate::draw::{ArcOptions, BLUE, CenterOptions, ImageOptions, ImageSource, RED, RectOptions};
use crate::error::CanvasError;
use crate::export::ExportFormat;
use crate::hit::ShapeKind;
use crate::input::{BoardOptions, MouseButton, PointerEvent};
use crate::transform::{BoundingRect, OriginCoord};
use std::cell::{Cell, RefCell};
use std::f64::consts::{FRAC_PI_2, PI};
use std::rc::Rc;

fn create_test_canvas() -> Canvas {
    Canvas::new(100.0, 100.0, 1.0).unwrap()
}

type Hits = Rc<RefCell<Vec<&'static str>>>;

fn clickable_rect(x: f64, y: f64, size: f64, hits: &Hits, name: &'static str) -> RectOptions {
    let hits = Rc::clone(hits);
    RectOptions {
        position: (x, y),
        size: (size, size),
        ..RectOptions::default()
    }
    .with_click(move |_| hits.borrow_mut().push(name))
}

fn pixel(canvas: &Canvas, x: u32, y: u32) -> [u8; 4] {
    let png = canvas.encode(ExportFormat::Png, 1.0).unwrap();
    image::load_from_memory(&png)
        .unwrap()
        .to_rgba8()
        .get_pixel(x, y)
        .0
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([0, 0, 255, 255]));
    let mut buffer = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png).unwrap();
    buffer.into_inner()
}

#[test]
fn test_topmost_shape_wins() {
    let mut canvas = create_test_canvas();
    let hits = Rc::new(RefCell::new(Vec::new()));

    canvas.rect(&clickable_rect(10.0, 10.0, 40.0, &hits, "bottom"));
    canvas.rect(&clickable_rect(30.0, 30.0, 40.0, &hits, "top"));

    assert!(canvas.handle_click(40.0, 40.0));
    assert!(canvas.handle_click(15.0, 15.0));
    assert_eq!(*hits.borrow(), vec!["top", "bottom"]);
}

#[test]
fn test_click_without_match_is_noop() {
    let mut canvas = create_test_canvas();
    let hits = Rc::new(RefCell::new(Vec::new()));
    canvas.rect(&clickable_rect(10.0, 10.0, 20.0, &hits, "rect"));

    assert!(!canvas.handle_click(90.0, 90.0));
    assert!(hits.borrow().is_empty());
}

#[test]
fn test_shapes_without_handler_are_not_registered() {
    let mut canvas = create_test_canvas();
    canvas.rect(&RectOptions::default());
    canvas.arc(&ArcOptions::default());
    assert!(canvas.registry().is_empty());
}

#[test]
fn test_registry_reset_each_render() {
    let mut canvas = create_test_canvas();
    let hits = Rc::new(RefCell::new(Vec::new()));
    let draw_hits = Rc::clone(&hits);
    canvas.set_draw(move |canvas| {
        canvas.rect(&clickable_rect(10.0, 10.0, 20.0, &draw_hits, "rect"));
        Ok(())
    });

    canvas.render().unwrap();
    let first_generation = canvas.registry().generation();
    assert_eq!(canvas.registry().len(), 1);

    canvas.render().unwrap();
    assert_eq!(canvas.registry().len(), 1);
    assert_eq!(canvas.registry().generation(), first_generation + 1);

    canvas.clear_draw();
    canvas.render().unwrap();
    assert!(canvas.registry().is_empty());
}

#[test]
fn test_click_respects_device_pixel_scale() {
    let mut canvas = Canvas::new(100.0, 100.0, 2.0).unwrap();
    assert_eq!(canvas.pixel_width(), 200.0);

    let hits = Rc::new(RefCell::new(Vec::new()));
    canvas.rect(&clickable_rect(10.0, 10.0, 20.0, &hits, "rect"));

    assert!(canvas.handle_click(15.0, 15.0));
    assert!(!canvas.handle_click(35.0, 15.0));
    assert_eq!(pixel(&canvas, 30, 30), [255, 0, 0, 255]);
}

#[test]
fn test_bounding_rect_offset_and_stretch() {
    let mut canvas = create_test_canvas();
    canvas.set_bounding_rect(BoundingRect::new(100.0, 50.0, 200.0, 200.0));
    let hits = Rc::new(RefCell::new(Vec::new()));
    canvas.rect(&clickable_rect(10.0, 10.0, 20.0, &hits, "rect"));

    // Client (140, 90) is 40/40 CSS px into a 2x stretched element.
    assert!(canvas.handle_click(140.0, 90.0));
    assert!(!canvas.handle_click(110.0, 60.0));
}

#[test]
fn test_centered_y_up_pointer_matches_drawing() {
    let mut canvas = Canvas::new(100.0, 100.0, 2.0).unwrap();
    let hits = Rc::new(RefCell::new(Vec::new()));
    canvas
        .center(CenterOptions {
            y_up: true,
            ..CenterOptions::default()
        })
        .unwrap();
    canvas.rect(&clickable_rect(10.0, 10.0, 20.0, &hits, "rect"));

    // Local (20, 20) sits at logical (70, 30) once centered and flipped.
    assert_eq!(canvas.to_local(70.0, 30.0), Some((20.0, 20.0)));
    assert_eq!(pixel(&canvas, 140, 60), [255, 0, 0, 255]);
    assert!(canvas.handle_click(70.0, 30.0));
    assert!(!canvas.handle_click(70.0, 70.0));
    assert_eq!(hits.borrow().len(), 1);
}

#[test]
fn test_centering_survives_render_without_accumulating() {
    let mut canvas = create_test_canvas();
    canvas.set_draw(|canvas| {
        canvas.center(CenterOptions {
            origin: Some([OriginCoord::Absolute(10.0), OriginCoord::Absolute(10.0)]),
            save: false,
            ..CenterOptions::default()
        })?;
        Ok(())
    });

    canvas.render().unwrap();
    canvas.render().unwrap();
    assert_eq!(canvas.to_local(10.0, 10.0), Some((0.0, 0.0)));
    assert_eq!(canvas.context().matrix().x0(), 10.0);
}

#[test]
fn test_restore_state_reverts_origin() {
    let mut canvas = create_test_canvas();
    assert!(matches!(
        canvas.restore_state(),
        Err(CanvasError::NothingToRestore)
    ));

    canvas.center(CenterOptions::default()).unwrap();
    assert_eq!(canvas.to_local(50.0, 50.0), Some((0.0, 0.0)));

    canvas.restore_state().unwrap();
    assert_eq!(canvas.to_local(50.0, 50.0), Some((50.0, 50.0)));
}

#[test]
fn test_shapes_keep_their_frame_after_restore() {
    let mut canvas = create_test_canvas();
    let hits = Rc::new(RefCell::new(Vec::new()));

    canvas.center(CenterOptions::default()).unwrap();
    canvas.rect(&clickable_rect(0.0, 0.0, 10.0, &hits, "centered"));
    canvas.restore_state().unwrap();
    canvas.rect(&clickable_rect(0.0, 0.0, 10.0, &hits, "plain"));

    assert_eq!(pixel(&canvas, 55, 55), [255, 0, 0, 255]);
    assert!(canvas.handle_click(55.0, 55.0));
    assert!(canvas.handle_click(5.0, 5.0));
    assert!(!canvas.handle_click(30.0, 30.0));
    assert_eq!(*hits.borrow(), vec!["centered", "plain"]);
}

#[test]
fn test_flipped_restore_keeps_drawing_on_surface() {
    let mut canvas = create_test_canvas();
    let hits = Rc::new(RefCell::new(Vec::new()));

    canvas
        .center(CenterOptions {
            y_up: true,
            ..CenterOptions::default()
        })
        .unwrap();
    canvas.restore_state().unwrap();
    canvas.rect(&clickable_rect(10.0, 10.0, 20.0, &hits, "rect"));

    // Y still points up, now from the bottom-left corner.
    assert_eq!(pixel(&canvas, 20, 80), [255, 0, 0, 255]);
    assert_eq!(pixel(&canvas, 20, 20), [0, 0, 0, 0]);
    assert_eq!(canvas.to_local(20.0, 80.0), Some((20.0, 20.0)));
    assert!(canvas.handle_click(20.0, 80.0));
    assert!(!canvas.handle_click(20.0, 20.0));
    assert_eq!(hits.borrow().len(), 1);
}

#[test]
fn test_nested_render_is_rejected() {
    let mut canvas = create_test_canvas();
    let hits = Rc::new(RefCell::new(Vec::new()));
    let draw_hits = Rc::clone(&hits);
    canvas.set_draw(move |canvas| {
        canvas.rect(&clickable_rect(10.0, 10.0, 20.0, &draw_hits, "rect"));
        assert!(matches!(
            canvas.render(),
            Err(CanvasError::RenderInProgress)
        ));
        Ok(())
    });

    canvas.render().unwrap();
    assert_eq!(canvas.registry().len(), 1);
    assert_eq!(pixel(&canvas, 20, 20), [255, 0, 0, 255]);
    assert!(canvas.handle_click(20.0, 20.0));
}

#[test]
fn test_handler_can_rerender_inside_dispatch() {
    let mut canvas = create_test_canvas();
    let clicks = Rc::new(Cell::new(0));
    let offset = Rc::new(Cell::new(0.0));

    let draw_clicks = Rc::clone(&clicks);
    let draw_offset = Rc::clone(&offset);
    canvas.set_draw(move |canvas| {
        let clicks = Rc::clone(&draw_clicks);
        let offset = Rc::clone(&draw_offset);
        canvas.rect(
            &RectOptions {
                position: (draw_offset.get(), 0.0),
                size: (20.0, 20.0),
                ..RectOptions::default()
            }
            .with_click(move |canvas| {
                clicks.set(clicks.get() + 1);
                offset.set(offset.get() + 50.0);
                canvas.render().unwrap();
            }),
        );
        Ok(())
    });
    canvas.render().unwrap();

    assert!(canvas.handle_click(10.0, 10.0));
    assert_eq!(clicks.get(), 1);
    assert_eq!(canvas.registry().len(), 1);

    // The rectangle moved; the old spot no longer hits.
    assert!(!canvas.handle_click(10.0, 10.0));
    assert!(canvas.handle_click(60.0, 10.0));
    assert_eq!(clicks.get(), 2);
}

#[test]
fn test_render_failure_carries_cause() {
    let mut canvas = create_test_canvas();
    canvas.set_draw(|_| Err(anyhow::anyhow!("boom")));

    let err = canvas.render().unwrap_err();
    assert!(matches!(err, CanvasError::RenderFailure { .. }));
    let source = std::error::Error::source(&err).unwrap();
    assert_eq!(source.to_string(), "boom");

    // The callback stays installed for the next pass.
    assert!(canvas.render().is_err());
}

#[test]
fn test_anticlockwise_arc_registers_swapped_sector() {
    let mut canvas = create_test_canvas();
    let hits = Rc::new(RefCell::new(Vec::new()));
    let arc_hits = Rc::clone(&hits);
    canvas.arc(
        &ArcOptions {
            center: (50.0, 50.0),
            radius: 30.0,
            start_angle: 0.0,
            end_angle: FRAC_PI_2,
            anticlockwise: true,
            ..ArcOptions::default()
        }
        .with_click(move |_| arc_hits.borrow_mut().push("arc")),
    );

    // Angle π (left of center) is inside the anticlockwise sweep.
    assert!(canvas.handle_click(50.0 + 20.0 * PI.cos(), 50.0));
    // Angle π/4 is the part that was skipped.
    let quarter = std::f64::consts::FRAC_PI_4;
    assert!(!canvas.handle_click(50.0 + 20.0 * quarter.cos(), 50.0 + 20.0 * quarter.sin()));
    assert_eq!(hits.borrow().len(), 1);
}

#[test]
fn test_resize_coalesces_redraws() {
    let mut canvas = create_test_canvas();
    let renders = Rc::new(Cell::new(0));
    let counter = Rc::clone(&renders);
    canvas.set_draw(move |_| {
        counter.set(counter.get() + 1);
        Ok(())
    });

    assert!(!canvas.on_animation_frame().unwrap());
    canvas.on_resize(200.0, 120.0, 2.0).unwrap();
    canvas.on_resize(220.0, 140.0, 2.0).unwrap();
    assert!(canvas.is_redraw_scheduled());
    assert_eq!(canvas.pixel_width(), 440.0);
    assert_eq!(canvas.pixel_height(), 280.0);

    assert!(canvas.on_animation_frame().unwrap());
    assert!(!canvas.on_animation_frame().unwrap());
    assert_eq!(renders.get(), 1);
}

#[test]
fn test_zero_sized_canvas_never_hits() {
    let mut canvas = Canvas::new(0.0, 0.0, 1.0).unwrap();
    let hits = Rc::new(RefCell::new(Vec::new()));
    canvas.rect(&clickable_rect(0.0, 0.0, 10.0, &hits, "rect"));

    assert!(!canvas.handle_click(0.0, 0.0));
    assert!(canvas.to_local(0.0, 0.0).is_none());
}

#[test]
fn test_invalid_dimensions_rejected() {
    assert!(matches!(
        Canvas::new(f64::NAN, 10.0, 1.0),
        Err(CanvasError::InvalidDimensions { .. })
    ));
}

#[test]
fn test_image_without_source_is_ignored() {
    let mut canvas = create_test_canvas();
    canvas.image(&ImageOptions::default());
    assert_eq!(canvas.pending_image_count(), 0);
}

#[test]
fn test_image_load_draws_and_registers() {
    let mut canvas = create_test_canvas();
    let hits = Rc::new(RefCell::new(Vec::new()));
    let image_hits = Rc::clone(&hits);
    canvas.image(
        &ImageOptions {
            src: Some(ImageSource::Bytes(png_bytes(10, 10))),
            position: (50.0, 50.0),
            size: Some((20.0, 20.0)),
            ..ImageOptions::default()
        }
        .with_click(move |_| image_hits.borrow_mut().push("image")),
    );
    assert_eq!(canvas.pending_image_count(), 1);
    assert!(canvas.registry().is_empty());

    assert_eq!(canvas.load_pending_images(), 1);
    assert_eq!(canvas.pending_image_count(), 0);
    assert_eq!(
        canvas.registry().get(0).map(|shape| shape.kind()),
        Some(ShapeKind::Image)
    );
    assert_eq!(pixel(&canvas, 50, 50), [0, 0, 255, 255]);

    assert!(canvas.handle_click(45.0, 55.0));
    assert!(!canvas.handle_click(65.0, 50.0));
    assert_eq!(hits.borrow().len(), 1);
}

#[test]
fn test_stale_image_load_is_discarded() {
    let mut canvas = create_test_canvas();
    canvas.image(
        &ImageOptions {
            src: Some(ImageSource::Bytes(png_bytes(4, 4))),
            ..ImageOptions::default()
        }
        .with_click(|_| {}),
    );

    canvas.render().unwrap();
    assert_eq!(canvas.pending_image_count(), 0);
    assert_eq!(canvas.load_pending_images(), 0);
    assert!(canvas.registry().is_empty());
    assert_eq!(pixel(&canvas, 0, 0), [0, 0, 0, 0]);
}

#[test]
fn test_render_drops_unloaded_images() {
    let mut canvas = create_test_canvas();
    canvas.set_draw(|canvas| {
        canvas.image(&ImageOptions {
            src: Some(ImageSource::Bytes(png_bytes(4, 4))),
            ..ImageOptions::default()
        });
        Ok(())
    });

    canvas.render().unwrap();
    canvas.render().unwrap();
    canvas.render().unwrap();
    assert_eq!(canvas.pending_image_count(), 1);
    assert_eq!(canvas.load_pending_images(), 1);
}

#[test]
fn test_broken_image_is_skipped() {
    let mut canvas = create_test_canvas();
    canvas.image(
        &ImageOptions {
            src: Some(ImageSource::Bytes(vec![1, 2, 3])),
            ..ImageOptions::default()
        }
        .with_click(|_| {}),
    );

    assert_eq!(canvas.load_pending_images(), 0);
    assert!(canvas.registry().is_empty());
}

#[test]
fn test_drawing_board_strokes_follow_pointer() {
    let mut canvas = create_test_canvas();
    canvas.drawing_board(BoardOptions {
        line_width: 6.0,
        color: BLUE,
    });

    assert!(!canvas.handle_pointer(PointerEvent::moved(10.0, 50.0)));
    assert!(canvas.handle_pointer(PointerEvent::down(10.0, 50.0)));
    assert!(canvas.handle_pointer(PointerEvent::moved(90.0, 50.0)));
    assert!(canvas.handle_pointer(PointerEvent::up(90.0, 50.0)));
    assert!(!canvas.handle_pointer(PointerEvent::moved(90.0, 90.0)));

    assert_eq!(pixel(&canvas, 50, 50), [0, 0, 255, 255]);
    assert_eq!(pixel(&canvas, 50, 80), [0, 0, 0, 0]);
}

#[test]
fn test_drawing_board_pen_changes() {
    let mut canvas = create_test_canvas();
    canvas.set_board_color(RED);
    assert!(canvas.drawing_board_state().is_none());

    canvas.drawing_board(BoardOptions::default());
    canvas.set_board_color(RED);
    canvas.set_board_line_width(4.0);
    let board = canvas.drawing_board_state().unwrap();
    assert_eq!(board.options.color, RED);
    assert_eq!(board.options.line_width, 4.0);

    canvas.disable_drawing_board();
    assert!(!canvas.handle_pointer(PointerEvent::down(10.0, 10.0)));
}

#[test]
fn test_secondary_buttons_are_ignored() {
    let mut canvas = create_test_canvas();
    let hits = Rc::new(RefCell::new(Vec::new()));
    canvas.rect(&clickable_rect(0.0, 0.0, 50.0, &hits, "rect"));

    let right_click = PointerEvent::click(10.0, 10.0).with_button(MouseButton::Right);
    assert!(!canvas.handle_pointer(right_click));
    assert!(canvas.handle_pointer(PointerEvent::click(10.0, 10.0)));
    assert_eq!(hits.borrow().len(), 1);
}

#[test]
fn test_data_url_export() {
    let mut canvas = create_test_canvas();
    canvas.rect(&RectOptions::default());

    let png = canvas.to_data_url("image/png", None).unwrap();
    assert!(png.starts_with("data:image/png;base64,"));
    let jpeg = canvas.to_data_url("image/jpeg", Some(0.5)).unwrap();
    assert!(jpeg.starts_with("data:image/jpeg;base64,"));
    let fallback = canvas.to_data_url("image/bmp", None).unwrap();
    assert!(fallback.starts_with("data:image/png;base64,"));

    let mut blob = None;
    canvas.to_blob("image/jpeg", None, |result| blob = Some(result));
    let blob = blob.unwrap().unwrap();
    assert_eq!(blob.mime_type, "image/jpeg");
    assert!(!blob.is_empty());
}
