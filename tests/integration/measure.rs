use skity_geometry::*;

fn assert_point(p: Point, x: f32, y: f32) {
    assert!((p.x - x).abs() < 1e-3 && (p.y - y).abs() < 1e-3, "{:?} != ({}, {})", p, x, y);
}

fn measure_all(path: &Path) -> f32 {
    ContourMeasureIter::new(path, false, 1.0).map(|c| c.length()).sum()
}

#[test]
fn closed_triangle() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.line_to(10.0, 0.0);
    pb.line_to(10.0, 10.0);
    pb.close();
    let path = pb.finish().unwrap();

    let contours: Vec<_> = ContourMeasureIter::new(&path, false, 1.0).collect();
    assert_eq!(contours.len(), 1);
    assert!(contours[0].is_closed());
    assert!((contours[0].length() - (20.0 + 10.0 * 2.0f32.sqrt())).abs() < 1e-3);
}

#[test]
fn square_pos_tan() {
    let path = PathBuilder::from_rect(Rect::from_xywh(0.0, 0.0, 10.0, 10.0).unwrap());

    let measure = PathMeasure::new(&path, false, 1.0);
    assert_eq!(measure.length(), 40.0);
    assert!(measure.is_closed());

    let (pos, tangent) = measure.pos_tan(35.0).unwrap();
    assert_eq!(pos, Point::from_xy(0.0, 5.0));
    assert_eq!(tangent, Point::from_xy(0.0, -1.0));
}

#[test]
fn pos_tan_at_the_ends() {
    let mut pb = PathBuilder::new();
    pb.move_to(10.0, 10.0);
    pb.cubic_to(40.0, -20.0, 80.0, 60.0, 100.0, 30.0);
    let path = pb.finish().unwrap();

    let measure = PathMeasure::new(&path, false, 1.0);
    let length = measure.length();
    assert!(length > 90.0);

    let (start, _) = measure.pos_tan(0.0).unwrap();
    assert_point(start, 10.0, 10.0);

    let (end, _) = measure.pos_tan(length).unwrap();
    assert_point(end, 100.0, 30.0);

    // Out of range distances are clamped.
    let (before, _) = measure.pos_tan(-5.0).unwrap();
    assert_point(before, 10.0, 10.0);
    let (after, _) = measure.pos_tan(length + 5.0).unwrap();
    assert_point(after, 100.0, 30.0);

    assert!(measure.pos_tan(f32::NAN).is_none());
}

#[test]
fn tangent_is_normalized() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.quad_to(50.0, 100.0, 100.0, 0.0);
    let path = pb.finish().unwrap();

    let measure = PathMeasure::new(&path, false, 1.0);
    let length = measure.length();
    let mut d = 0.0;
    while d <= length {
        let (_, tangent) = measure.pos_tan(d).unwrap();
        assert!((tangent.length() - 1.0).abs() < 1e-4);
        d += length / 16.0;
    }
}

#[test]
fn line_segment_round_trip() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.line_to(30.0, 40.0);
    let path = pb.finish().unwrap();

    let measure = PathMeasure::new(&path, false, 1.0);
    assert_eq!(measure.length(), 50.0);

    let mut pb = PathBuilder::new();
    assert!(measure.segment(0.0, 50.0, true, &mut pb));
    let part = pb.finish().unwrap();

    assert_eq!(part.verbs(), &[PathVerb::Move, PathVerb::Line]);
    assert_point(part.points()[0], 0.0, 0.0);
    assert_point(part.points()[1], 30.0, 40.0);
}

#[test]
fn segments_add_up() {
    let mut pb = PathBuilder::new();
    pb.move_to(10.0, 10.0);
    pb.cubic_to(40.0, -20.0, 80.0, 60.0, 100.0, 30.0);
    pb.conic_to(120.0, 0.0, 140.0, 30.0, 0.5);
    let path = pb.finish().unwrap();

    let measure = PathMeasure::new(&path, false, 1.0);
    let length = measure.length();

    let mut pb = PathBuilder::new();
    assert!(measure.segment(0.0, length * 0.3, true, &mut pb));
    let first = pb.finish().unwrap();

    let mut pb = PathBuilder::new();
    assert!(measure.segment(length * 0.3, length, true, &mut pb));
    let second = pb.finish().unwrap();

    let sum = measure_all(&first) + measure_all(&second);
    assert!((sum - length).abs() < length * 0.01);
}

#[test]
fn pos_tan_is_monotonic_on_a_line() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.line_to(100.0, 0.0);
    pb.line_to(200.0, 0.0);
    let path = pb.finish().unwrap();

    let measure = PathMeasure::new(&path, false, 1.0);
    let mut prev = -1.0;
    for i in 0..=20 {
        let (p, _) = measure.pos_tan(i as f32 * 10.0).unwrap();
        assert!(p.x > prev);
        prev = p.x;
    }
}

#[test]
fn empty_segment_range() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.line_to(100.0, 0.0);
    let path = pb.finish().unwrap();

    let measure = PathMeasure::new(&path, false, 1.0);

    let mut pb = PathBuilder::new();
    assert!(!measure.segment(60.0, 40.0, true, &mut pb));
    assert!(!measure.segment(f32::NAN, 40.0, true, &mut pb));
    assert!(pb.is_empty());

    // A zero-length range still yields a point-sized line.
    assert!(measure.segment(50.0, 50.0, true, &mut pb));
    assert_eq!(pb.len(), 2);
}

#[test]
fn multiple_contours() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.line_to(10.0, 0.0);
    pb.move_to(50.0, 50.0);
    pb.line_to(50.0, 50.0);
    pb.move_to(0.0, 100.0);
    pb.line_to(0.0, 130.0);
    pb.line_to(40.0, 130.0);
    pb.close();
    let path = pb.finish().unwrap();

    let mut measure = PathMeasure::new(&path, false, 1.0);
    assert_eq!(measure.length(), 10.0);
    assert!(!measure.is_closed());

    // The zero-length contour is skipped.
    assert!(measure.next_contour());
    assert_eq!(measure.length(), 120.0);
    assert!(measure.is_closed());

    assert!(!measure.next_contour());
    assert!(measure.contour().is_none());
    assert_eq!(measure.length(), 0.0);
    assert!(measure.pos_tan(0.0).is_none());

    measure.set_path(&path);
    assert_eq!(measure.length(), 10.0);
}

#[test]
fn force_closed() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.line_to(30.0, 0.0);
    pb.line_to(30.0, 40.0);
    let path = pb.finish().unwrap();

    let open = PathMeasure::new(&path, false, 1.0);
    assert_eq!(open.length(), 70.0);
    assert!(!open.is_closed());

    let closed = PathMeasure::new(&path, true, 1.0);
    assert_eq!(closed.length(), 120.0);
    assert!(closed.is_closed());
}

#[test]
fn circle_circumference() {
    let path = PathBuilder::from_circle(0.0, 0.0, 50.0).unwrap();
    let expected = 2.0 * core::f32::consts::PI * 50.0;

    let coarse = PathMeasure::new(&path, false, 1.0).length();
    assert!((coarse - expected).abs() < 1.0);

    let precise = PathMeasure::new(&path, false, 10.0).length();
    assert!((precise - expected).abs() < 0.3);
    assert!(precise >= coarse);
}

#[test]
fn non_finite_contour_is_skipped() {
    let mut pb = PathBuilder::new();
    pb.move_to(-1e38, 0.0);
    pb.line_to(1e38, 0.0);
    pb.line_to(-1e38, 0.0);
    pb.line_to(1e38, 0.0);
    pb.move_to(0.0, 0.0);
    pb.line_to(10.0, 0.0);
    let path = pb.finish().unwrap();

    // The first contour overflows while accumulating its length.
    let lengths: Vec<f32> = ContourMeasureIter::new(&path, false, 1.0).map(|c| c.length()).collect();
    assert_eq!(lengths, vec![10.0]);
}
