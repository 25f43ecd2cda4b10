use skity_geometry::*;

fn zero_len_subpath() -> Path {
    let mut pb = PathBuilder::new();
    pb.move_to(50.0, 50.0);
    pb.line_to(50.0, 50.0);
    pb.finish().unwrap()
}

fn assert_bounds(path: &Path, left: f32, top: f32, right: f32, bottom: f32) {
    let b = path.bounds();
    assert!((b.left() - left).abs() < 1e-3, "{:?}", b);
    assert!((b.top() - top).abs() < 1e-3, "{:?}", b);
    assert!((b.right() - right).abs() < 1e-3, "{:?}", b);
    assert!((b.bottom() - bottom).abs() < 1e-3, "{:?}", b);
}

fn stroke_with_cap(path: &Path, cap: LineCap) -> Option<Path> {
    let mut stroke = Stroke::default();
    stroke.width = 20.0;
    stroke.line_cap = cap;
    path.stroke(&stroke, 1.0)
}

#[test]
fn zero_len_subpath_butt_cap() {
    // A zero-len subpath with a butt line cap produces nothing.
    assert_eq!(stroke_with_cap(&zero_len_subpath(), LineCap::Butt), None);
}

#[test]
fn zero_len_subpath_round_cap() {
    let path = stroke_with_cap(&zero_len_subpath(), LineCap::Round).unwrap();
    let bounds = path.bounds();
    assert!((bounds.center_x() - 50.0).abs() < 1e-3);
    assert!((bounds.center_y() - 50.0).abs() < 1e-3);
    assert!((bounds.width() - 20.0).abs() < 1e-3);
    assert!((bounds.height() - 20.0).abs() < 1e-3);
}

#[test]
fn zero_len_subpath_square_cap() {
    let path = stroke_with_cap(&zero_len_subpath(), LineCap::Square).unwrap();
    assert_bounds(&path, 40.0, 40.0, 60.0, 60.0);
}

#[test]
fn move_close() {
    let mut pb = PathBuilder::new();
    pb.move_to(50.0, 50.0);
    pb.close();
    let path = pb.finish().unwrap();

    assert!(stroke_with_cap(&path, LineCap::Butt).is_none());
    assert!(stroke_with_cap(&path, LineCap::Round).is_some());
    assert!(stroke_with_cap(&path, LineCap::Square).is_some());
}

#[test]
fn zero_width() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.line_to(100.0, 0.0);
    let path = pb.finish().unwrap();

    let mut stroke = Stroke::default();
    stroke.width = 0.0;
    assert!(path.stroke(&stroke, 1.0).is_none());
}

#[test]
fn line_bounds() {
    let mut pb = PathBuilder::new();
    pb.move_to(10.0, 50.0);
    pb.line_to(90.0, 50.0);
    let path = pb.finish().unwrap();

    let butt = stroke_with_cap(&path, LineCap::Butt).unwrap();
    assert_bounds(&butt, 10.0, 40.0, 90.0, 60.0);

    let square = stroke_with_cap(&path, LineCap::Square).unwrap();
    assert_bounds(&square, 0.0, 40.0, 100.0, 60.0);
}

#[test]
fn miter_limit_fallback() {
    // A very sharp corner.
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.line_to(100.0, 0.0);
    pb.line_to(0.0, 10.0);
    let path = pb.finish().unwrap();

    let mut stroke = Stroke::default();
    stroke.width = 4.0;
    stroke.line_join = LineJoin::Miter;
    stroke.miter_limit = 4.0;
    let miter = path.stroke(&stroke, 1.0).unwrap();

    stroke.line_join = LineJoin::Bevel;
    let bevel = path.stroke(&stroke, 1.0).unwrap();

    assert_eq!(miter, bevel);

    // With a huge limit the miter tip sticks out.
    stroke.line_join = LineJoin::Miter;
    stroke.miter_limit = 100.0;
    let long_miter = path.stroke(&stroke, 1.0).unwrap();
    assert!(long_miter.bounds().right() > bevel.bounds().right() + 10.0);
}

#[test]
fn closed_rect_has_two_contours() {
    let path = PathBuilder::from_rect(Rect::from_xywh(10.0, 10.0, 80.0, 80.0).unwrap());

    let mut stroke = Stroke::default();
    stroke.width = 10.0;
    let result = path.stroke(&stroke, 1.0).unwrap();

    assert_eq!(result.contours_count(), 2);
    assert_bounds(&result, 5.0, 5.0, 95.0, 95.0);
}

#[test]
fn ignore_center() {
    let path = PathBuilder::from_rect(Rect::from_xywh(10.0, 10.0, 80.0, 80.0).unwrap());

    let mut options = StrokeOptions::default();
    options.radius = 5.0;
    options.can_ignore_center = true;
    let result = PathStroker::new().stroke_with_options(&path, &options).unwrap();

    assert_eq!(result.contours_count(), 1);
    assert_bounds(&result, 5.0, 5.0, 95.0, 95.0);
}

#[test]
fn circle() {
    let path = PathBuilder::from_circle(100.0, 100.0, 50.0).unwrap();

    let mut stroke = Stroke::default();
    stroke.width = 2.0;
    let result = path.stroke(&stroke, 1.0).unwrap();

    assert_eq!(result.contours_count(), 2);
    let bounds = result.bounds();
    assert!(bounds.left() <= 49.0 + 1e-3);
    assert!(bounds.right() >= 151.0 - 1e-3);
    assert!(bounds.width() < 110.0);
}

#[test]
fn round_caps_and_large_scale() {
    let path = {
        let mut pb = PathBuilder::new();
        pb.move_to(60.0 / 16.0, 100.0 / 16.0);
        pb.line_to(140.0 / 16.0, 100.0 / 16.0);
        pb.finish().unwrap()
    };

    let mut stroke = Stroke::default();
    stroke.width = 6.0;
    stroke.line_cap = LineCap::Round;

    let ts = Transform::from_scale(16.0, 16.0);
    let res_scale = PathStroker::compute_resolution_scale(&ts);
    assert_eq!(res_scale, 16.0);

    let coarse = path.stroke(&stroke, 1.0).unwrap();
    let precise = path.stroke(&stroke, res_scale).unwrap();
    assert!(precise.len() >= coarse.len());

    let bounds = precise.transform(ts).unwrap().bounds();
    assert!((bounds.left() - 12.0).abs() < 0.5);
    assert!((bounds.right() - 188.0).abs() < 0.5);
}

#[test]
fn round_cap_join() {
    let mut pb = PathBuilder::new();
    pb.move_to(170.0, 30.0);
    pb.line_to(30.553378, 99.048418);
    pb.cubic_to(30.563658, 99.066835, 30.546308, 99.280724, 30.557592, 99.305282);
    let path = pb.finish().unwrap();

    let mut stroke = Stroke::default();
    stroke.width = 30.0;
    stroke.line_cap = LineCap::Round;
    stroke.line_join = LineJoin::Round;

    assert!(path.stroke(&stroke, 1.0).is_some());
}

#[test]
fn conic_arc() {
    let mut pb = PathBuilder::new();
    pb.move_to(100.0, 0.0);
    pb.conic_to(100.0, 100.0, 0.0, 100.0, core::f32::consts::FRAC_1_SQRT_2);
    let path = pb.finish().unwrap();

    let mut stroke = Stroke::default();
    stroke.width = 10.0;
    let result = path.stroke(&stroke, 1.0).unwrap();

    assert_eq!(result.contours_count(), 1);
    let bounds = result.bounds();
    assert!(bounds.right() >= 105.0 - 1e-3);
    assert!(bounds.bottom() >= 105.0 - 1e-3);
}

#[test]
fn cusp() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.cubic_to(100.0, 100.0, 0.0, 100.0, 100.0, 0.0);
    let path = pb.finish().unwrap();

    let mut stroke = Stroke::default();
    stroke.width = 8.0;
    assert!(path.stroke(&stroke, 1.0).is_some());
}

// Based on skia/tests/StrokerTest.cpp

#[test]
fn quad_stroker_one_off() {
    let mut pb = PathBuilder::new();
    pb.move_to(f32::from_bits(0x43c99223), f32::from_bits(0x42b7417e));
    pb.quad_to(f32::from_bits(0x4285d839), f32::from_bits(0x43ed6645),
               f32::from_bits(0x43c941c8), f32::from_bits(0x42b3ace3));
    let path = pb.finish().unwrap();

    let mut stroke = Stroke::default();
    stroke.width = 164.683548;

    assert!(path.stroke(&stroke, 1.0).is_some());
}

#[test]
fn cubic_stroker_one_off() {
    let mut pb = PathBuilder::new();
    pb.move_to(f32::from_bits(0x433f5370), f32::from_bits(0x43d1f4b3));
    pb.cubic_to(f32::from_bits(0x4331cb76), f32::from_bits(0x43ea3340),
                f32::from_bits(0x4388f498), f32::from_bits(0x42f7f08d),
                f32::from_bits(0x43f1cd32), f32::from_bits(0x42802ec1));
    let path = pb.finish().unwrap();

    let mut stroke = Stroke::default();
    stroke.width = 42.835968;

    assert!(path.stroke(&stroke, 1.0).is_some());
}
