use skity_geometry::*;

fn line(length: f32) -> Path {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.line_to(length, 0.0);
    pb.finish().unwrap()
}

fn dash(path: &Path, intervals: Vec<f32>, phase: f32) -> Option<Path> {
    let effect = DashPathEffect::new(intervals, phase)?;
    let mut pb = PathBuilder::new();
    if !effect.filter_path(&mut pb, path, true) {
        return None;
    }

    pb.finish()
}

fn lengths(path: &Path) -> Vec<f32> {
    ContourMeasureIter::new(path, false, 1.0).map(|c| c.length()).collect()
}

#[test]
fn crbug_140642() {
    // We used to see this construct, and due to rounding as we accumulated
    // our length, the loop where we apply the phase would run off the end of
    // the array, since it relied on just -= each interval value, which did not
    // behave as "expected". Now the code explicitly checks for walking off the
    // end of that array.
    assert!(DashPathEffect::new(vec![27734.0, 35660.0, 2157846850.0, 247.0], -248.135982067).is_some());
}

#[test]
fn crbug_124652() {
    // This particular test/bug only applies to the float case, where
    // large values can "swamp" small ones.
    assert!(DashPathEffect::new(vec![837099584.0, 33450.0], -10.0).is_some());
}

#[test]
fn simple_line() {
    let path = dash(&line(100.0), vec![10.0, 10.0], 0.0).unwrap();

    assert_eq!(path.contours_count(), 5);
    assert_eq!(path.verbs().len(), 10);
    for (i, p) in path.points().chunks(2).enumerate() {
        assert!((p[0].x - i as f32 * 20.0).abs() < 1e-4);
        assert!((p[1].x - p[0].x - 10.0).abs() < 1e-4);
    }

    let total: f32 = lengths(&path).iter().sum();
    assert!((total - 50.0).abs() < 1e-3);
}

#[test]
fn phase() {
    let path = dash(&line(100.0), vec![10.0, 10.0], 5.0).unwrap();

    let lengths = lengths(&path);
    assert_eq!(lengths.len(), 6);
    assert!((lengths[0] - 5.0).abs() < 1e-4);
    assert!((lengths[5] - 5.0).abs() < 1e-4);
}

#[test]
fn closed_contour_joins_at_seam() {
    let square = PathBuilder::from_rect(Rect::from_xywh(0.0, 0.0, 10.0, 10.0).unwrap());

    // The last dash wraps around the start point.
    let path = dash(&square, vec![20.0, 10.0], 0.0).unwrap();
    assert_eq!(path.contours_count(), 1);
    assert_eq!(path.points()[0], Point::from_xy(0.0, 10.0));
    assert_eq!(path.last_point(), Some(Point::from_xy(10.0, 10.0)));

    let lengths = lengths(&path);
    assert!((lengths[0] - 30.0).abs() < 1e-4);
}

#[test]
fn closed_contour_without_seam() {
    let square = PathBuilder::from_rect(Rect::from_xywh(0.0, 0.0, 10.0, 10.0).unwrap());

    let path = dash(&square, vec![10.0, 10.0], 0.0).unwrap();
    assert_eq!(path.contours_count(), 2);
    assert_eq!(lengths(&path), vec![10.0, 10.0]);
}

#[test]
fn curves() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.cubic_to(30.0, 60.0, 70.0, -60.0, 100.0, 0.0);
    pb.quad_to(150.0, 50.0, 200.0, 0.0);
    pb.conic_to(250.0, 50.0, 300.0, 0.0, 2.0);
    let path = pb.finish().unwrap();

    let source_length = PathMeasure::new(&path, false, 1.0).length();
    let dashed = dash(&path, vec![5.0, 5.0], 0.0).unwrap();

    let total: f32 = lengths(&dashed).iter().sum();
    assert!((total - source_length * 0.5).abs() < source_length * 0.02);
}

#[test]
fn zero_length_on_interval() {
    let path = dash(&line(20.0), vec![0.0, 10.0], 0.0).unwrap();

    // Each "on" interval is a zero-length line, so round caps can be drawn.
    assert_eq!(path.contours_count(), 2);
    assert_eq!(path.points()[0], path.points()[1]);

    let mut stroke = Stroke::default();
    stroke.width = 4.0;
    stroke.line_cap = LineCap::Round;
    assert!(path.stroke(&stroke, 1.0).is_some());
}

// Extremely large path_length/dash_length ratios may cause infinite looping
// due to single precision rounding.
#[test]
fn infinite_dash() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 5.0);
    pb.line_to(5000000.0, 5.0);
    let path = pb.finish().unwrap();

    assert_eq!(dash(&path, vec![0.2, 0.2], 0.0), None);
}

#[test]
fn fill_is_not_dashed() {
    let effect = DashPathEffect::new(vec![10.0, 10.0], 0.0).unwrap();
    let mut pb = PathBuilder::new();
    assert!(!effect.filter_path(&mut pb, &line(100.0), false));
}

#[test]
fn as_a_dash() {
    let effect = DashPathEffect::new(vec![10.0, 5.0, 2.0, 5.0], -2.0).unwrap();
    let info = effect.as_a_dash().unwrap();
    assert_eq!(info.intervals, vec![10.0, 5.0, 2.0, 5.0]);
    assert_eq!(info.phase, 20.0);

    let discrete = DiscretePathEffect::new(10.0, 1.0, 0).unwrap();
    assert!(discrete.as_a_dash().is_none());
}
