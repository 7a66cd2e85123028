use floorpath_core::geometry::Aabb;
use floorpath_core::{BuildOptions, Coord, FloorPathError, PointRecord, RouteTable};

fn pentagon() -> Vec<PointRecord> {
    // Regular pentagon with side 10, vertex 0 on top, clockwise.
    let r = 10.0 / (2.0 * 36f64.to_radians().sin());
    (0..5)
        .map(|k| {
            let a = (90.0 - 72.0 * k as f64).to_radians();
            PointRecord::room(format!("p{k}"), r * a.cos(), r * a.sin())
        })
        .collect()
}

fn jittered_grid(side: usize, spacing: f64) -> Vec<PointRecord> {
    let mut out = Vec::with_capacity(side * side);
    for row in 0..side {
        for col in 0..side {
            let k = (row * side + col) as f64;
            let x = col as f64 * spacing + 7.0 * (k * 1.3).sin();
            let y = row as f64 * spacing + 7.0 * (k * 0.7).cos();
            if (row + col) % 5 == 0 {
                out.push(PointRecord::room(format!("r{row}-{col}"), x, y));
            } else {
                out.push(PointRecord::waypoint(x, y));
            }
        }
    }
    out
}

#[test]
fn pentagon_route_takes_the_short_side() {
    let opts = BuildOptions { neighbor_window: 24.0, ..BuildOptions::default() };
    let t = RouteTable::build(&pentagon(), &opts).unwrap();
    let r = t.route("p0", "p2").unwrap();
    assert_eq!(r.nodes, vec![0, 1, 2]);
    assert_eq!(r.path.len(), 3);
    assert!((r.length.unwrap() - 20.0).abs() < 1e-9);
    assert!((t.distance_between("p0", "p2").unwrap() - 20.0).abs() < 1e-9);
}

#[test]
fn disconnected_clusters_have_no_route() {
    let mut recs = Vec::new();
    for (ox, oy, label) in [(0.0, 0.0, "a"), (1000.0, 1000.0, "b")] {
        for i in 0..3 {
            for j in 0..3 {
                recs.push(PointRecord::waypoint(ox + i as f64 * 30.0, oy + j as f64 * 30.0));
            }
        }
        recs.push(PointRecord::room(label, ox + 15.0, oy + 15.0));
    }
    let t = RouteTable::build(&recs, &BuildOptions::default()).unwrap();
    let r = t.route("a", "b").unwrap();
    assert!(r.is_empty());
    assert!(r.path.is_empty());
    assert_eq!(r.length, None);
    assert_eq!(t.distance_between("a", "b"), Err(FloorPathError::NoPathFound));
    assert!(!t.route("a", "a").unwrap().is_empty());
}

#[test]
fn table_properties_hold_on_grid() {
    let recs = jittered_grid(8, 40.0);
    let t = RouteTable::build(&recs, &BuildOptions::default()).unwrap();
    let p = t.paths();
    let n = p.len() as u32;
    assert_eq!(n, 64);

    for i in 0..n {
        assert_eq!(p.dist(i, i), 0.0);
        assert_eq!(p.reconstruct_path(i, i), vec![i]);
        for j in 0..n {
            let (a, b) = (p.dist(i, j), p.dist(j, i));
            if a.is_finite() || b.is_finite() {
                assert!((a - b).abs() < 1e-9, "asymmetric {i}->{j}: {a} vs {b}");
            }
            match p.next_hop(i, j) {
                None => {
                    assert!(p.reconstruct_path(i, j).is_empty());
                    assert_eq!(p.dist(i, j), f64::INFINITY);
                }
                Some(_) => {
                    let path = p.reconstruct_path(i, j);
                    assert_eq!(path.first(), Some(&i));
                    assert_eq!(path.last(), Some(&j));
                    let walked: f64 = path
                        .windows(2)
                        .map(|w| t.coord(w[0]).unwrap().distance(t.coord(w[1]).unwrap()))
                        .sum();
                    assert!((walked - p.dist(i, j)).abs() < 1e-6);
                }
            }
            for k in 0..n {
                let via = p.dist(i, k) + p.dist(k, j);
                assert!(p.dist(i, j) <= via + 1e-9, "triangle violated {i}->{j} via {k}");
            }
        }
    }
}

#[test]
fn k_nearest_respects_limit_and_order() {
    let recs = jittered_grid(8, 40.0);
    let t = RouteTable::build(&recs, &BuildOptions::default()).unwrap();
    for (cx, cy) in [(0.0, 0.0), (140.0, 140.0), (300.0, 20.0)] {
        let window = Aabb::square(Coord::new(cx, cy), 60.0);
        let hits = t.index().k_nearest(&window, 6);
        assert!(hits.len() <= 6);
        for w in hits.windows(2) {
            assert!(w[0].distance <= w[1].distance);
        }
        for h in &hits {
            assert!(window.contains(h.coord));
        }
    }
}

#[test]
fn duplicate_coordinates_route_with_zero_cost_hop() {
    let recs = vec![
        PointRecord::room("a", 0.0, 0.0),
        PointRecord::waypoint(40.0, 0.0),
        PointRecord::waypoint(40.0, 0.0),
        PointRecord::room("b", 80.0, 0.0),
    ];
    let t = RouteTable::build(&recs, &BuildOptions::default()).unwrap();
    let r = t.route("a", "b").unwrap();
    assert!((r.length.unwrap() - 80.0).abs() < 1e-9);
}

#[test]
fn hover_picks_nearest_room_or_nothing() {
    let t = RouteTable::build(&pentagon(), &BuildOptions::default()).unwrap();
    assert_eq!(t.nearest_room(Coord::new(0.0, 30.0)), Some("p0"));
    assert_eq!(t.nearest_room(Coord::new(2_000.0, 2_000.0)), None);
    assert_eq!(t.nearest_point(Coord::new(2_000.0, 2_000.0)), None);
}
