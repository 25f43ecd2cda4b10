use skity_geometry::*;

#[test]
fn debug_output() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.conic_to(10.0, 10.0, 20.0, 0.0, 0.5);
    pb.close();
    let path = pb.finish().unwrap();

    assert_eq!(path.bounds(), Rect::from_ltrb(0.0, 0.0, 20.0, 10.0).unwrap());
    assert_eq!(format!("{:?}", path),
               "Path { segments: \"M 0 0 K 10 10 20 0 0.5 Z\", \
                bounds: Rect { left: 0.0, top: 0.0, right: 20.0, bottom: 10.0 } }");
}

#[test]
fn no_move_before_line() {
    let mut pb = PathBuilder::new();
    pb.line_to(30.0, 40.0);
    let path = pb.finish().unwrap();

    assert_eq!(path.bounds(), Rect::from_ltrb(0.0, 0.0, 30.0, 40.0).unwrap());
    assert_eq!(path.segments().collect::<Vec<_>>(), &[
       PathSegment::MoveTo(Point::from_xy(0.0, 0.0)),
       PathSegment::LineTo(Point::from_xy(30.0, 40.0)),
    ]);
}

#[test]
fn double_close() {
    let mut pb = PathBuilder::new();
    pb.move_to(10.0, 10.0);
    pb.line_to(20.0, 10.0);
    pb.line_to(20.0, 20.0);
    pb.close();
    pb.close();
    let path = pb.finish().unwrap();

    assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Line, PathVerb::Line, PathVerb::Close]);
    assert_eq!(path.bounds(), Rect::from_ltrb(10.0, 10.0, 20.0, 20.0).unwrap());
    assert_eq!(path.segments().collect::<Vec<_>>(), &[
        PathSegment::MoveTo(Point::from_xy(10.0, 10.0)),
        PathSegment::LineTo(Point::from_xy(20.0, 10.0)),
        PathSegment::LineTo(Point::from_xy(20.0, 20.0)),
        PathSegment::LineTo(Point::from_xy(10.0, 10.0)),
        PathSegment::Close,
    ]);
}

#[test]
fn raw_segments_skip_close_line() {
    let mut pb = PathBuilder::new();
    pb.move_to(10.0, 10.0);
    pb.line_to(20.0, 10.0);
    pb.line_to(20.0, 20.0);
    pb.close();
    let path = pb.finish().unwrap();

    assert_eq!(path.raw_segments().collect::<Vec<_>>(), &[
        PathSegment::MoveTo(Point::from_xy(10.0, 10.0)),
        PathSegment::LineTo(Point::from_xy(20.0, 10.0)),
        PathSegment::LineTo(Point::from_xy(20.0, 20.0)),
        PathSegment::Close,
    ]);
}

#[test]
fn close_on_start_point_has_no_line() {
    let mut pb = PathBuilder::new();
    pb.move_to(10.0, 10.0);
    pb.line_to(20.0, 10.0);
    pb.line_to(10.0, 10.0);
    pb.close();
    let path = pb.finish().unwrap();

    assert_eq!(path.segments().collect::<Vec<_>>(), &[
        PathSegment::MoveTo(Point::from_xy(10.0, 10.0)),
        PathSegment::LineTo(Point::from_xy(20.0, 10.0)),
        PathSegment::LineTo(Point::from_xy(10.0, 10.0)),
        PathSegment::Close,
    ]);
}

#[test]
fn auto_close() {
    let mut pb = PathBuilder::new();
    pb.move_to(10.0, 10.0);
    pb.line_to(20.0, 10.0);
    pb.line_to(20.0, 20.0);
    let path = pb.finish().unwrap();

    let mut iter = path.segments();
    iter.set_auto_close(true);
    assert_eq!(iter.collect::<Vec<_>>(), &[
        PathSegment::MoveTo(Point::from_xy(10.0, 10.0)),
        PathSegment::LineTo(Point::from_xy(20.0, 10.0)),
        PathSegment::LineTo(Point::from_xy(20.0, 20.0)),
        PathSegment::LineTo(Point::from_xy(10.0, 10.0)),
        PathSegment::Close,
    ]);
}

#[test]
fn double_move_to_2() {
    let mut pb = PathBuilder::new();
    pb.move_to(10.0, 20.0);
    pb.move_to(20.0, 10.0);
    pb.line_to(30.0, 40.0);
    let path = pb.finish().unwrap();

    assert_eq!(path.bounds(), Rect::from_ltrb(20.0, 10.0, 30.0, 40.0).unwrap());
    assert_eq!(path.segments().collect::<Vec<_>>(), &[
        PathSegment::MoveTo(Point::from_xy(20.0, 10.0)),
        PathSegment::LineTo(Point::from_xy(30.0, 40.0)),
    ]);
}

#[test]
fn line_after_close() {
    let mut pb = PathBuilder::new();
    pb.move_to(10.0, 20.0);
    pb.line_to(30.0, 40.0);
    pb.close();
    pb.line_to(20.0, 20.0);
    let path = pb.finish().unwrap();

    assert_eq!(path.bounds(), Rect::from_ltrb(10.0, 20.0, 30.0, 40.0).unwrap());
    assert_eq!(path.raw_segments().collect::<Vec<_>>(), &[
        PathSegment::MoveTo(Point::from_xy(10.0, 20.0)),
        PathSegment::LineTo(Point::from_xy(30.0, 40.0)),
        PathSegment::Close,
        PathSegment::MoveTo(Point::from_xy(10.0, 20.0)),
        PathSegment::LineTo(Point::from_xy(20.0, 20.0)),
    ]);
}

#[test]
fn conic_degradation() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.conic_to(10.0, 10.0, 20.0, 0.0, 1.0);
    let path = pb.finish().unwrap();
    assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Quad]);

    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.conic_to(10.0, 10.0, 20.0, 0.0, 0.0);
    let path = pb.finish().unwrap();
    assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Line]);
    assert_eq!(path.last_point(), Some(Point::from_xy(20.0, 0.0)));

    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.conic_to(10.0, 10.0, 20.0, 0.0, f32::INFINITY);
    let path = pb.finish().unwrap();
    assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Line, PathVerb::Line]);

    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.conic_to(10.0, 10.0, 20.0, 0.0, 0.5);
    let path = pb.finish().unwrap();
    assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Conic]);
    assert_eq!(path.conic_weights(), &[0.5]);
}

#[test]
fn transform() {
    let mut pb = PathBuilder::new();
    pb.move_to(10.0, 20.0);
    pb.line_to(30.0, 40.0);
    let mut path = pb.finish().unwrap();

    path = path.transform(Transform::from_row(2.0, 0.7, -0.3, 0.5, 10.0, 20.0)).unwrap();

    assert_eq!(path.segments().collect::<Vec<_>>(), &[
        PathSegment::MoveTo(Point::from_xy(24.0, 37.0)),
        PathSegment::LineTo(Point::from_xy(58.0, 61.0)),
    ]);
}

#[test]
fn invalid_transform() {
    let mut pb = PathBuilder::new();
    pb.move_to(10.0, 20.0);
    pb.line_to(30.0, 40.0);
    let path = pb.finish().unwrap();

    // will produce infinity
    assert_eq!(path.transform(Transform::from_scale(f32::MAX, f32::MAX)), None);
}

#[test]
fn rect() {
    let rect = Rect::from_xywh(10.0, 20.0, 30.0, 40.0).unwrap();
    let path = PathBuilder::from_rect(rect);
    assert_eq!(path.bounds(), rect);
    assert_eq!(path.contours_count(), 1);
    assert_eq!(path.verbs().last(), Some(&PathVerb::Close));
}

#[test]
fn circle() {
    let path = PathBuilder::from_circle(250.0, 250.0, 300.0).unwrap();
    assert_eq!(path.verbs(), &[
        PathVerb::Move,
        PathVerb::Conic,
        PathVerb::Conic,
        PathVerb::Conic,
        PathVerb::Conic,
        PathVerb::Close,
    ]);
    assert_eq!(path.bounds(), Rect::from_ltrb(-50.0, -50.0, 550.0, 550.0).unwrap());
    assert!(path.conic_weights().iter().all(|w| (w - core::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6));
}

#[test]
fn rrect() {
    let rect = Rect::from_xywh(0.0, 0.0, 100.0, 50.0).unwrap();
    let rrect = RRect::from_rect_xy(rect, 10.0, 10.0).unwrap();
    assert_eq!(rrect.kind(), RRectType::Simple);

    let path = PathBuilder::from_rrect(rrect).unwrap();
    assert_eq!(path.contours_count(), 1);
    assert_eq!(path.bounds(), rect);
    assert_eq!(path.verbs().iter().filter(|v| **v == PathVerb::Conic).count(), 4);
}

#[test]
fn arc_to() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.arc_to(100.0, 0.0, 100.0, 100.0, 20.0);
    let path = pb.finish().unwrap();

    assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Line, PathVerb::Conic]);
    assert_eq!(path.points()[1], Point::from_xy(80.0, 0.0));
    assert_eq!(path.points()[2], Point::from_xy(100.0, 0.0));
    let last = path.last_point().unwrap();
    assert!((last.x - 100.0).abs() < 1e-4);
    assert!((last.y - 20.0).abs() < 1e-4);
}

#[test]
fn svg_arc() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.svg_arc_to(50.0, 50.0, 0.0, ArcSize::Small, PathDirection::CW, 100.0, 0.0);
    let path = pb.finish().unwrap();

    assert!(path.verbs().contains(&PathVerb::Conic));
    let last = path.last_point().unwrap();
    assert!((last.x - 100.0).abs() < 1e-3);
    assert!(last.y.abs() < 1e-3);
    // A half circle.
    assert!((path.bounds().height() - 50.0).abs() < 0.1);
}

#[test]
fn svg_arc_with_zero_radius_is_a_line() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.svg_arc_to(0.0, 50.0, 0.0, ArcSize::Large, PathDirection::CCW, 100.0, 0.0);
    let path = pb.finish().unwrap();
    assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Line]);
}

#[test]
fn push_path_keeps_contours() {
    let mut pb = PathBuilder::new();
    pb.push_rect(Rect::from_xywh(0.0, 0.0, 10.0, 10.0).unwrap(), PathDirection::CW, 0);
    pb.push_circle(50.0, 50.0, 5.0, PathDirection::CCW);
    let shapes = pb.finish().unwrap();

    let mut pb = PathBuilder::new();
    pb.push_path(&shapes);
    pb.push_path_with_transform(&shapes, Transform::from_translate(100.0, 0.0));
    let path = pb.finish().unwrap();

    assert_eq!(path.contours_count(), 4);
    assert_eq!(path.bounds(), Rect::from_ltrb(0.0, 0.0, 155.0, 55.0).unwrap());
}

#[test]
fn reverse_push_path() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.line_to(10.0, 0.0);
    pb.line_to(10.0, 10.0);
    let path = pb.finish().unwrap();

    let mut pb = PathBuilder::new();
    pb.reverse_push_path(&path);
    let reversed = pb.finish().unwrap();

    assert_eq!(reversed.points(), &[
        Point::from_xy(10.0, 10.0),
        Point::from_xy(10.0, 0.0),
        Point::from_xy(0.0, 0.0),
    ]);
}

#[test]
fn to_quads() {
    let path = PathBuilder::from_circle(0.0, 0.0, 10.0).unwrap();
    let quads = path.to_quads().unwrap();
    assert!(!quads.verbs().contains(&PathVerb::Conic));
    assert!(quads.verbs().contains(&PathVerb::Quad));
    assert_eq!(quads.contours_count(), 1);
}
