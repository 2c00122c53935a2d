mod common;

use std::collections::HashSet;

use skiroute_lib::{
    build_graph, coalesce_steps, filter_edges, find_shortest_path, path_cost, reduce_to_steps,
    Difficulty, Edge, EdgeId, EdgeKind, Point, ReduceOptions,
};

use common::point;

fn three_points() -> Vec<Point> {
    vec![
        point(1, "Top", 39.60, -106.37),
        point(2, "Junction", 39.601, -106.371),
        point(3, "Summit", 39.602, -106.372),
    ]
}

fn green_then_lift() -> Vec<Edge> {
    vec![
        Edge::trail(1, "Trestle", "green", 1, 2, 3.0),
        Edge::lift(2, "Quad", 2, 3, 4.0),
    ]
}

#[test]
fn green_trail_then_lift_costs_seven_minutes() {
    let edges = filter_edges(&green_then_lift(), Difficulty::Blue, &HashSet::new());
    let path = find_shortest_path(&three_points(), &edges, 1, 3).expect("route exists");

    let ids: Vec<EdgeId> = path.iter().map(|edge| edge.id).collect();
    assert_eq!(ids, vec![EdgeId::Segment(1), EdgeId::Lift(2)]);
    assert_eq!(path_cost(&path), 7.0);
}

#[test]
fn avoiding_the_only_lift_leaves_no_route() {
    let avoid = HashSet::from([EdgeId::Lift(2)]);
    let edges = filter_edges(&green_then_lift(), Difficulty::Blue, &avoid);
    assert!(find_shortest_path(&three_points(), &edges, 1, 3).is_none());
}

#[test]
fn black_trail_is_filtered_under_a_green_ceiling() {
    let edges = vec![
        Edge::trail(1, "Trestle", "black", 1, 2, 3.0),
        Edge::lift(2, "Quad", 2, 3, 4.0),
    ];
    let filtered = filter_edges(&edges, Difficulty::Green, &HashSet::new());
    assert!(filtered.iter().all(|edge| edge.id != EdgeId::Segment(1)));
    assert!(find_shortest_path(&three_points(), &filtered, 1, 3).is_none());
}

#[test]
fn same_start_and_goal_is_empty_not_none() {
    let points = three_points();
    for id in [1, 2, 3] {
        assert_eq!(
            find_shortest_path(&points, &green_then_lift(), id, id),
            Some(Vec::new())
        );
    }
}

#[test]
fn unreachable_goal_is_none() {
    // Edges only point downhill from 1.
    assert!(find_shortest_path(&three_points(), &green_then_lift(), 3, 1).is_none());
}

#[test]
fn direct_route_is_never_worse_than_a_detour() {
    let points = three_points();
    for direct_minutes in [2.0, 7.0, 12.0] {
        let edges = vec![
            Edge::trail(1, "Upper", "blue", 1, 2, 3.0),
            Edge::trail(2, "Lower", "blue", 2, 3, 4.0),
            Edge::trail(3, "Direct", "blue", 1, 3, direct_minutes),
        ];
        let ab = path_cost(&find_shortest_path(&points, &edges, 1, 2).unwrap());
        let bc = path_cost(&find_shortest_path(&points, &edges, 2, 3).unwrap());
        let ac = path_cost(&find_shortest_path(&points, &edges, 1, 3).unwrap());
        assert!(ac <= ab + bc);
        assert!(ac <= direct_minutes);
    }
}

#[test]
fn stricter_ceilings_never_admit_more_edges() {
    let resort = common::sample_resort();
    let avoid = HashSet::new();
    for pair in Difficulty::ALL.windows(2) {
        let (strict, loose) = (pair[0], pair[1]);
        let strict_ids: HashSet<EdgeId> = filter_edges(&resort.edges, strict, &avoid)
            .iter()
            .map(|edge| edge.id)
            .collect();
        let loose_ids: HashSet<EdgeId> = filter_edges(&resort.edges, loose, &avoid)
            .iter()
            .map(|edge| edge.id)
            .collect();
        assert!(
            strict_ids.is_subset(&loose_ids),
            "{strict} admitted edges that {loose} rejected"
        );
    }
}

#[test]
fn trail_segments_merge_ahead_of_a_lift() {
    let points = vec![
        point(1, "A", 0.0, 0.0),
        point(2, "B", 0.0, 0.001),
        point(3, "C", 0.0, 0.002),
        point(4, "D", 0.0, 0.003),
    ];
    let path = vec![
        Edge::trail(10, "Trestle", "blue", 1, 2, 5.0).in_trail(7),
        Edge::trail(11, "Trestle", "blue", 2, 3, 4.0).in_trail(7),
        Edge::lift(1, "LiftA", 3, 4, 8.0),
    ];
    let graph = build_graph(&points, &path);
    let steps = reduce_to_steps(&path, &graph, &ReduceOptions::default());

    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].name, "Trestle");
    assert_eq!(steps[0].kind, EdgeKind::Trail);
    assert_eq!(steps[0].estimated_time_minutes, 9.0);
    assert_eq!(steps[0].start_coords, points[0].coordinates());
    assert_eq!(steps[0].end_coords, points[2].coordinates());
    assert_eq!(steps[1].name, "LiftA");
    assert_eq!(steps[1].kind, EdgeKind::Lift);
    assert_eq!(steps[1].estimated_time_minutes, 8.0);

    // Reducing the reduced steps again changes nothing.
    assert_eq!(coalesce_steps(steps.clone()), steps);
}

#[test]
fn short_connectors_drop_and_long_ones_stay() {
    let points = vec![
        point(1, "A", 0.0, 0.0),
        point(2, "B", 0.0, 0.001),
        point(3, "C", 0.0, 0.002),
    ];
    let short = vec![
        Edge::lift(1, "LiftA", 1, 2, 8.0),
        Edge::connector(20, "Connector", 2, 3, 0.5),
    ];
    let long = vec![
        Edge::lift(1, "LiftA", 1, 2, 8.0),
        Edge::connector(20, "Connector", 2, 3, 5.0),
    ];

    let graph = build_graph(&points, &long);
    let options = ReduceOptions::default();
    assert_eq!(reduce_to_steps(&short, &graph, &options).len(), 1);

    let kept = reduce_to_steps(&long, &graph, &options);
    assert_eq!(kept.len(), 2);
    assert_eq!(kept[1].name, "Connector");
    assert_eq!(kept[1].estimated_time_minutes, 5.0);
}

#[test]
fn edges_to_unknown_points_resolve_to_the_origin() {
    let points = vec![point(1, "A", 39.6, -106.37)];
    let path = vec![Edge::trail(1, "Lost", "green", 1, 42, 2.0)];
    let graph = build_graph(&points, &path);

    assert_eq!(
        find_shortest_path(&points, &path, 1, 42).map(|path| path.len()),
        Some(1)
    );
    let steps = reduce_to_steps(&path, &graph, &ReduceOptions::default());
    assert_eq!(steps[0].end_coords.lat, 0.0);
    assert_eq!(steps[0].end_coords.lng, 0.0);
}
