use skity_geometry::*;
use skity_geometry::path_geometry::*;

fn assert_point(p: Point, x: f32, y: f32) {
    assert!((p.x - x).abs() < 1e-4 && (p.y - y).abs() < 1e-4, "{:?} != ({}, {})", p, x, y);
}

#[test]
fn unit_arc_quarter() {
    let conics = Conic::build_unit_arc(
        Point::from_xy(1.0, 0.0),
        Point::from_xy(0.0, 1.0),
        PathDirection::CW,
        Transform::identity(),
    );

    assert_eq!(conics.len(), 1);
    assert!((conics[0].weight - core::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
    assert_point(conics[0].points[0], 1.0, 0.0);
    assert_point(conics[0].points[1], 1.0, 1.0);
    assert_point(conics[0].points[2], 0.0, 1.0);
}

#[test]
fn unit_arc_full_turn_is_empty() {
    let conics = Conic::build_unit_arc(
        Point::from_xy(1.0, 0.0),
        Point::from_xy(1.0, 0.0),
        PathDirection::CW,
        Transform::identity(),
    );
    assert!(conics.is_empty());
}

#[test]
fn unit_arc_is_transformed() {
    let ts = Transform::from_row(10.0, 0.0, 0.0, 10.0, 5.0, 5.0);
    let conics = Conic::build_unit_arc(
        Point::from_xy(1.0, 0.0),
        Point::from_xy(-1.0, 0.0),
        PathDirection::CCW,
        ts,
    );

    assert_eq!(conics.len(), 2);
    assert_point(conics[0].points[0], 15.0, 5.0);
    // Counter-clockwise goes through the top.
    assert_point(conics[0].points[2], 5.0, -5.0);
    assert_point(conics[1].points[2], -5.0, 5.0);
}

#[test]
fn conic_eval() {
    let conic = Conic::new(
        Point::from_xy(1.0, 0.0),
        Point::from_xy(1.0, 1.0),
        Point::from_xy(0.0, 1.0),
        core::f32::consts::FRAC_1_SQRT_2,
    );

    assert_point(conic.eval(0.0), 1.0, 0.0);
    assert_point(conic.eval(1.0), 0.0, 1.0);

    // A rational quad with this weight is an exact circle arc.
    for i in 0..=8 {
        let p = conic.eval(i as f32 / 8.0);
        assert!((p.length() - 1.0).abs() < 1e-5);
    }

    let mid = conic.eval(0.5);
    assert_point(mid, core::f32::consts::FRAC_1_SQRT_2, core::f32::consts::FRAC_1_SQRT_2);

    let mut tangent = conic.eval_tangent(0.0);
    tangent.normalize();
    assert_point(tangent, 0.0, 1.0);
}

#[test]
fn conic_chop() {
    let conic = Conic::new(
        Point::from_xy(1.0, 0.0),
        Point::from_xy(1.0, 1.0),
        Point::from_xy(0.0, 1.0),
        core::f32::consts::FRAC_1_SQRT_2,
    );

    let halves = conic.chop();
    assert_eq!(halves[0].points[0], conic.points[0]);
    assert_eq!(halves[1].points[2], conic.points[2]);
    assert_eq!(halves[0].points[2], halves[1].points[0]);
    assert_eq!(halves[0].weight, halves[1].weight);

    let parts = conic.chop_at(0.25).unwrap();
    let expected = conic.eval(0.25);
    assert_point(parts[0].points[2], expected.x, expected.y);

    let middle = conic.chop_at_range(0.25, 0.75);
    let start = conic.eval(0.25);
    let end = conic.eval(0.75);
    assert_point(middle.points[0], start.x, start.y);
    assert_point(middle.points[2], end.x, end.y);
    assert_point(middle.eval(0.5), conic.eval(0.5).x, conic.eval(0.5).y);
}

#[test]
fn conic_to_quads() {
    let quads = AutoConicToQuads::compute(
        Point::from_xy(100.0, 0.0),
        Point::from_xy(100.0, 100.0),
        Point::from_xy(0.0, 100.0),
        core::f32::consts::FRAC_1_SQRT_2,
    )
    .unwrap();

    assert!(quads.len >= 2);
    assert_eq!(quads.points[0], Point::from_xy(100.0, 0.0));
    assert_point(quads.points[quads.len as usize * 2], 0.0, 100.0);

    assert!(AutoConicToQuads::compute(
        Point::from_xy(f32::NAN, 0.0),
        Point::from_xy(100.0, 100.0),
        Point::from_xy(0.0, 100.0),
        0.5,
    )
    .is_none());
}

#[test]
fn quad_chop() {
    let quad = [Point::from_xy(0.0, 0.0), Point::from_xy(50.0, 100.0), Point::from_xy(100.0, 0.0)];
    let mut dst = [Point::zero(); 5];
    chop_quad_at(&quad, NormalizedF32Exclusive::HALF, &mut dst);

    assert_eq!(dst[0], quad[0]);
    assert_eq!(dst[2], Point::from_xy(50.0, 50.0));
    assert_eq!(dst[4], quad[2]);
    assert_eq!(eval_quad_at(&quad, NormalizedF32::new(0.5).unwrap()), dst[2]);
}

#[test]
fn quad_max_curvature() {
    let quad = [Point::from_xy(0.0, 0.0), Point::from_xy(50.0, 100.0), Point::from_xy(100.0, 0.0)];
    assert_eq!(find_quad_max_curvature(&quad).get(), 0.5);
}

#[test]
fn cubic_to_quad() {
    let cubic = [
        Point::from_xy(0.0, 0.0),
        Point::from_xy(10.0, 20.0),
        Point::from_xy(20.0, 20.0),
        Point::from_xy(30.0, 0.0),
    ];

    let quad = cubic_to_quadratic(&cubic);
    assert_eq!(quad, [Point::from_xy(0.0, 0.0), Point::from_xy(15.0, 30.0), Point::from_xy(30.0, 0.0)]);

    let pieces = subdivide_cubic8(&cubic);
    assert_eq!(pieces[0], cubic[0]);
    assert_eq!(pieces[31], cubic[3]);
    for i in 0..7 {
        assert_eq!(pieces[i * 4 + 3], pieces[i * 4 + 4]);
    }
}

#[test]
fn cubic_eval() {
    let cubic = [
        Point::from_xy(0.0, 0.0),
        Point::from_xy(0.0, 100.0),
        Point::from_xy(100.0, 100.0),
        Point::from_xy(100.0, 0.0),
    ];

    assert_eq!(eval_cubic_pos_at(&cubic, NormalizedF32::ZERO), cubic[0]);
    assert_eq!(eval_cubic_pos_at(&cubic, NormalizedF32::ONE), cubic[3]);
    assert_point(eval_cubic_pos_at(&cubic, NormalizedF32::new(0.5).unwrap()), 50.0, 75.0);

    let mut tangent = eval_cubic_tangent_at(&cubic, NormalizedF32::ZERO);
    tangent.normalize();
    assert_point(tangent, 0.0, 1.0);
}

#[test]
fn cubic_with_coincident_control_points() {
    let cubic = [
        Point::from_xy(0.0, 0.0),
        Point::from_xy(0.0, 0.0),
        Point::from_xy(0.0, 0.0),
        Point::from_xy(10.0, 0.0),
    ];

    let tangent = eval_cubic_tangent_at(&cubic, NormalizedF32::ZERO);
    assert_eq!(tangent, Point::from_xy(10.0, 0.0));
    assert!(find_cubic_cusp(&cubic).is_none());
}

#[test]
fn unit_roots() {
    let mut roots = new_t_values();
    // (2t - 1)(t - 2)
    let count = find_unit_quad_roots(2.0, -5.0, 2.0, &mut roots);
    assert_eq!(count, 1);
    assert_eq!(roots[0].get(), 0.5);

    assert!(valid_unit_divide(1.0, 2.0).is_some());
    assert!(valid_unit_divide(2.0, 1.0).is_none());
    assert!(valid_unit_divide(0.0, 1.0).is_none());
}

#[test]
fn transform_points() {
    let ts = Transform::from_translate(10.0, 20.0).pre_scale(2.0, 3.0);
    let mut p = Point::from_xy(1.0, 1.0);
    ts.map_point(&mut p);
    assert_eq!(p, Point::from_xy(12.0, 23.0));

    let inv = ts.invert().unwrap();
    inv.map_point(&mut p);
    assert_point(p, 1.0, 1.0);

    assert_eq!(ts.map_vector(Point::from_xy(1.0, 1.0)), Point::from_xy(2.0, 3.0));
}
