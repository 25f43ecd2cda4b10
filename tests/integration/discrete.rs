use skity_geometry::*;

fn filter(effect: &DiscretePathEffect, path: &Path, is_stroke: bool) -> Path {
    let mut pb = PathBuilder::new();
    assert!(effect.filter_path(&mut pb, path, is_stroke));
    pb.finish().unwrap()
}

fn polyline() -> Path {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.line_to(100.0, 0.0);
    pb.line_to(100.0, 100.0);
    pb.finish().unwrap()
}

#[test]
fn closed_square() {
    let square = PathBuilder::from_rect(Rect::from_xywh(0.0, 0.0, 100.0, 100.0).unwrap());
    let effect = DiscretePathEffect::new(10.0, 0.0, 0).unwrap();
    let path = filter(&effect, &square, true);

    // 40 pieces, but the last one is produced by the close.
    assert_eq!(path.points().len(), 40);
    assert_eq!(path.verbs().last(), Some(&PathVerb::Close));
    assert_eq!(path.points()[0], Point::from_xy(5.0, 0.0));
}

#[test]
fn fill_closes_open_contours() {
    let effect = DiscretePathEffect::new(10.0, 0.0, 0).unwrap();

    let stroked = filter(&effect, &polyline(), true);
    assert_eq!(stroked.points().len(), 21);
    assert_ne!(stroked.verbs().last(), Some(&PathVerb::Close));

    let filled = filter(&effect, &polyline(), false);
    assert_eq!(filled.verbs().last(), Some(&PathVerb::Close));
    // The closing edge is measured as well.
    assert!(filled.points().len() > 30);
}

#[test]
fn jitter_depends_on_seed() {
    let path = polyline();

    let a = filter(&DiscretePathEffect::new(5.0, 3.0, 1).unwrap(), &path, true);
    let b = filter(&DiscretePathEffect::new(5.0, 3.0, 1).unwrap(), &path, true);
    let c = filter(&DiscretePathEffect::new(5.0, 3.0, 2).unwrap(), &path, true);

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.points().len(), c.points().len());
}

#[test]
fn jitter_is_perpendicular() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.line_to(100.0, 0.0);
    let path = pb.finish().unwrap();

    let effect = DiscretePathEffect::new(10.0, 4.0, 0).unwrap();
    let result = filter(&effect, &path, true);

    for (i, p) in result.points().iter().enumerate() {
        assert!((p.x - i as f32 * 10.0).abs() < 1e-3);
        assert!(p.y.abs() <= 4.0);
    }
}

#[test]
fn multiple_contours() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.line_to(100.0, 0.0);
    pb.move_to(0.0, 50.0);
    pb.line_to(15.0, 50.0);
    let path = pb.finish().unwrap();

    let effect = DiscretePathEffect::new(10.0, 2.0, 0).unwrap();
    let result = filter(&effect, &path, true);

    assert_eq!(result.contours_count(), 2);
    // The short contour is copied as is.
    let n = result.points().len();
    assert_eq!(result.points()[n - 2], Point::from_xy(0.0, 50.0));
    assert_eq!(result.points()[n - 1], Point::from_xy(15.0, 50.0));
}

#[test]
fn segment_count_is_capped() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.line_to(1000.0, 0.0);
    let path = pb.finish().unwrap();

    let effect = DiscretePathEffect::new(0.001, 1.0, 0).unwrap();
    let result = filter(&effect, &path, true);

    // A move plus one line per segment.
    assert_eq!(result.points().len(), MAX_DISCRETE_SEGMENTS as usize + 1);
    assert_eq!(result.contours_count(), 1);
}
