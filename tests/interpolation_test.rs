use cgmath::Vector2;
use rt_render::interpolation::{InterParam, interpolate_cell, interpolate_value};

const EPS: f64 = 1e-9;

fn unit_cell() -> InterParam {
    InterParam {
        x1: 0.0,
        y1: 0.0,
        x2: 1.0,
        y2: 1.0,
        v11: 0.0,
        v12: 10.0,
        v21: 20.0,
        v22: 30.0,
    }
}

#[test]
fn should_hit_endpoints() {
    for (x1, x2, v1, v2) in [(0.0, 10.0, 3.0, -7.0), (-2.5, 4.0, 1.0, 1.5), (7.0, 1.0, 9.0, 0.0)] {
        assert!((interpolate_value(x1, x2, v1, v2, x1) - v1).abs() < EPS);
        assert!((interpolate_value(x1, x2, v1, v2, x2) - v2).abs() < EPS);
    }
}

#[test]
fn should_average_when_points_coincide() {
    assert_eq!(interpolate_value(3.0, 3.0, 4.0, 8.0, 100.0), 6.0);
    assert_eq!(interpolate_value(-1.0, -1.0, 0.0, 1.0, -1.0), 0.5);
}

#[test]
fn should_interpolate_midpoint() {
    assert_eq!(interpolate_value(0.0, 10.0, 0.0, 100.0, 5.0), 50.0);
}

#[test]
fn should_extrapolate_outside_the_interval() {
    assert!((interpolate_value(0.0, 1.0, 0.0, 10.0, 2.0) - 20.0).abs() < EPS);
}

#[test]
fn should_reproduce_corners() {
    let cell = InterParam {
        x1: -1.0,
        y1: 2.0,
        x2: 3.0,
        y2: 5.0,
        ..unit_cell()
    };
    let corners = [
        (Vector2::new(cell.x1, cell.y1), cell.v11),
        (Vector2::new(cell.x1, cell.y2), cell.v12),
        (Vector2::new(cell.x2, cell.y1), cell.v21),
        (Vector2::new(cell.x2, cell.y2), cell.v22),
    ];
    for (point, expected) in corners {
        assert!(
            (interpolate_cell(&cell, point) - expected).abs() < EPS,
            "corner {:?} of\n{}",
            point,
            cell
        );
    }
}

#[test]
fn should_interpolate_cell_centre() {
    assert!((interpolate_cell(&unit_cell(), Vector2::new(0.5, 0.5)) - 15.0).abs() < EPS);
}

#[test]
fn should_interpolate_along_edges() {
    let cell = unit_cell();
    // x = x1 edge runs from v11 to v12
    assert!((interpolate_cell(&cell, Vector2::new(0.0, 0.25)) - 2.5).abs() < EPS);
    // y = y1 edge runs from v11 to v21
    assert!((interpolate_cell(&cell, Vector2::new(0.75, 0.0)) - 15.0).abs() < EPS);
}

#[test]
fn should_average_fully_degenerate_cell() {
    let cell = InterParam {
        x2: 0.0,
        y2: 0.0,
        ..unit_cell()
    };
    assert_eq!(interpolate_cell(&cell, Vector2::new(42.0, -3.0)), 15.0);
}

#[test]
fn should_interpolate_along_y_when_x_is_degenerate() {
    let cell = InterParam {
        x2: 0.0,
        ..unit_cell()
    };
    // (v11 + v21) / 2 = 10 at y1, (v12 + v22) / 2 = 20 at y2
    assert!((interpolate_cell(&cell, Vector2::new(0.0, 0.0)) - 10.0).abs() < EPS);
    assert!((interpolate_cell(&cell, Vector2::new(0.0, 0.5)) - 15.0).abs() < EPS);
    assert!((interpolate_cell(&cell, Vector2::new(0.0, 1.0)) - 20.0).abs() < EPS);
}

#[test]
fn should_interpolate_along_x_when_y_is_degenerate() {
    let cell = InterParam {
        y2: 0.0,
        ..unit_cell()
    };
    // (v11 + v12) / 2 = 5 at x1, (v21 + v22) / 2 = 25 at x2
    assert!((interpolate_cell(&cell, Vector2::new(0.0, 0.0)) - 5.0).abs() < EPS);
    assert!((interpolate_cell(&cell, Vector2::new(1.0, 0.0)) - 25.0).abs() < EPS);
}

#[test]
fn should_print_corners() {
    let text = unit_cell().to_string();
    assert!(text.contains("x1: 0 y1: 0 x2: 1 y2: 1"));
    assert!(text.contains("v12: 10"));
    assert!(text.ends_with("v22: 30"));
}
