#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use rand::prelude::SmallRng;
    use rand::{Rng, SeedableRng};
    use test_case::test_case;

    use formwork_rs::geometry::geo_traits::{CollidesWith, Shape};
    use formwork_rs::geometry::primitives::{Edge, Point, Rect, SPolygon};
    use formwork_rs::geometry::{is_inside_polygon, rotate_point, vector_from};

    fn unit_square() -> Vec<Point> {
        vec![Point(0.0, 0.0), Point(1.0, 0.0), Point(1.0, 1.0), Point(0.0, 1.0)]
    }

    fn l_shape() -> Vec<Point> {
        vec![
            Point(0.0, 0.0),
            Point(12.0, 0.0),
            Point(12.0, 6.0),
            Point(6.0, 6.0),
            Point(6.0, 12.0),
            Point(0.0, 12.0),
        ]
    }

    #[test_case(Point(0.5, 0.5), true; "centre")]
    #[test_case(Point(0.01, 0.99), true; "near corner")]
    #[test_case(Point(2.0, 0.5), false; "right")]
    #[test_case(Point(-0.5, 0.5), false; "left")]
    #[test_case(Point(0.5, 1.5), false; "above")]
    fn winding_unit_square(p: Point, inside: bool) {
        assert_eq!(is_inside_polygon(&unit_square(), &p), inside);
        //vertex order does not matter
        let mut cw = unit_square();
        cw.reverse();
        assert_eq!(is_inside_polygon(&cw, &p), inside);
    }

    #[test_case(Point(3.0, 3.0), true; "corner arm")]
    #[test_case(Point(9.0, 3.0), true; "horizontal arm")]
    #[test_case(Point(3.0, 9.0), true; "vertical arm")]
    #[test_case(Point(9.0, 9.0), false; "notch")]
    #[test_case(Point(13.0, 3.0), false; "outside")]
    fn winding_concave(p: Point, inside: bool) {
        assert_eq!(is_inside_polygon(&l_shape(), &p), inside);
    }

    #[test]
    fn rotation_round_trip() {
        let mut rng = SmallRng::seed_from_u64(0);
        for _ in 0..1000 {
            let p = Point(rng.random_range(-100.0..100.0), rng.random_range(-100.0..100.0));
            let angle = rng.random_range(0.0..360.0);
            let back = rotate_point(rotate_point(p, angle), -angle);
            assert!(approx_eq!(f64, p.0, back.0, epsilon = 1e-9));
            assert!(approx_eq!(f64, p.1, back.1, epsilon = 1e-9));
        }
        assert_eq!(rotate_point(Point(3.0, 4.0), 0.0), Point(3.0, 4.0));
    }

    #[test_case(0.0, Point(1.0, 0.0))]
    #[test_case(90.0, Point(0.0, 1.0))]
    #[test_case(180.0, Point(-1.0, 0.0))]
    #[test_case(270.0, Point(0.0, -1.0))]
    fn vector_from_angle(angle: f64, expected: Point) {
        let v = vector_from(angle);
        assert!(approx_eq!(f64, v.0, expected.0, epsilon = 1e-12));
        assert!(approx_eq!(f64, v.1, expected.1, epsilon = 1e-12));
    }

    #[test]
    fn polygon_validation() {
        //explicit closing vertex is dropped
        let mut closed = unit_square();
        closed.push(Point(0.0, 0.0));
        let square = SPolygon::new(closed).unwrap();
        assert_eq!(square.n_vertices(), 4);
        assert!(approx_eq!(f64, square.area(), 1.0));

        //clockwise input is reordered
        let mut cw = unit_square();
        cw.reverse();
        assert!(SPolygon::new(cw).unwrap().area() > 0.0);

        let bowtie = vec![Point(0.0, 0.0), Point(1.0, 1.0), Point(1.0, 0.0), Point(0.0, 1.0)];
        assert!(SPolygon::new(bowtie).is_err());
        let degenerate = vec![Point(0.0, 0.0), Point(1.0, 0.0), Point(2.0, 0.0)];
        assert!(SPolygon::new(degenerate).is_err());
        assert!(SPolygon::new(vec![Point(0.0, 0.0), Point(1.0, 0.0)]).is_err());
    }

    #[test]
    fn edge_construction() {
        let edge = Edge::try_new(Point(0.0, 0.0), Point(2.0, 0.0)).unwrap();
        assert_eq!(edge.closest_point_on_edge(&Point(1.0, 3.0)), Point(1.0, 0.0));
        assert_eq!(edge.closest_point_on_edge(&Point(-1.0, 1.0)), Point(0.0, 0.0));
        assert!(Edge::try_new(Point(1.0, 1.0), Point(1.0, 1.0)).is_err());
    }

    fn rect(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> SPolygon {
        SPolygon::from_rect(Rect::try_new(x_min, y_min, x_max, y_max).unwrap())
    }

    #[test_case(rect(1.0, 0.0, 2.0, 1.0), false; "sharing an edge")]
    #[test_case(rect(1.0, 1.0, 2.0, 2.0), false; "sharing a corner")]
    #[test_case(rect(0.5, 0.5, 1.5, 1.5), true; "overlapping corner")]
    #[test_case(rect(0.0, 0.0, 1.0, 1.0), true; "coincident")]
    #[test_case(rect(0.25, 0.25, 0.75, 0.75), true; "enclosed")]
    #[test_case(rect(-1.0, 0.25, 2.0, 0.75), true; "crossing band")]
    #[test_case(rect(3.0, 3.0, 4.0, 4.0), false; "apart")]
    fn region_collision(other: SPolygon, collides: bool) {
        let square = rect(0.0, 0.0, 1.0, 1.0);
        assert_eq!(square.collides_with(&other), collides);
        assert_eq!(other.collides_with(&square), collides);
    }
}
