use musou_shooter::geometry::*;

#[test]
fn touching_edges_do_not_intersect() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
    assert!(!a.intersects(&Rect::new(0.0, 10.0, 10.0, 10.0)));
    assert!(a.intersects(&Rect::new(9.5, 9.5, 10.0, 10.0)));
}

#[test]
fn rect_exactly_on_the_border_is_in_bounds() {
    assert!(in_bounds(&Rect::new(0.0, 0.0, 1600.0, 900.0)));
    assert_eq!(check_bound(&Rect::new(-1.0, 10.0, 50.0, 50.0)), (false, true));
    assert_eq!(check_bound(&Rect::new(10.0, 860.0, 50.0, 50.0)), (true, false));
}

#[test]
fn circle_overlap_uses_closest_point() {
    let r = Rect::new(100.0, 100.0, 50.0, 50.0);
    assert!(r.intersects_circle(Vec2::new(125.0, 125.0), 1.0));
    assert!(r.intersects_circle(Vec2::new(160.0, 125.0), 11.0));
    assert!(!r.intersects_circle(Vec2::new(160.0, 125.0), 10.0));
    // Corner: distance to (150, 150) is 5√2 ≈ 7.07.
    assert!(!r.intersects_circle(Vec2::new(155.0, 155.0), 7.0));
    assert!(r.intersects_circle(Vec2::new(155.0, 155.0), 7.2));
}

#[test]
fn orientation_is_a_unit_vector() {
    let org = Rect::from_center(Vec2::new(0.0, 0.0), 10.0, 10.0);
    let dst = Rect::from_center(Vec2::new(30.0, 40.0), 10.0, 10.0);
    let v = calc_orientation(&org, &dst);
    assert!((v.x - 0.6).abs() < 1e-6);
    assert!((v.y - 0.8).abs() < 1e-6);
}

#[test]
fn coincident_centres_point_straight_down() {
    let r = Rect::new(10.0, 10.0, 20.0, 20.0);
    assert_eq!(calc_orientation(&r, &r), Vec2::new(0.0, 1.0));
}
