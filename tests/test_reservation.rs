use pathina::core::grid::Grid;
use pathina::mapf::{ReservationTable, SpaceTimeAStar};

#[test]
fn test_reservations_are_monotonic_within_an_episode() {
    let mut rt = ReservationTable::new(4);
    rt.add_vertex_constraint(3, 1).unwrap();
    rt.add_path(0, &[0, 1, 2], false, false).unwrap();
    assert!(rt.is_reserved(3, 1));
    assert!(rt.is_reserved(1, 1));
    assert_eq!(rt.last_time_reserved(1), 3);
}

#[test]
fn test_direct_edge_constraints_work_without_the_flag() {
    let mut rt = ReservationTable::new(3);
    assert!(!rt.edge_collision());
    rt.add_edge_constraint(2, 0, 1).unwrap();
    assert!(rt.is_edge_reserved(2, 0, 1));
    assert!(!rt.is_edge_reserved(2, 1, 0));
}

#[test]
fn test_additional_weights_steer_the_planner() {
    let grid = Grid::new(3, 1).unwrap();
    let mut rt = ReservationTable::new(3);
    // Entering the middle cell at time 1 is heavily penalized, so the
    // cheapest plan pauses once and passes through a step later.
    rt.add_weight_path(1, &[1], 10.0).unwrap();
    let planner = SpaceTimeAStar::new(&grid);
    let path = planner.find_path_with_depth_limit(0, 2, 10, &rt).unwrap();
    assert_eq!(path, vec![0, 0, 1, 2]);
}

#[test]
fn test_parked_destination_blocks_later_agents() {
    let grid = Grid::new(3, 1).unwrap();
    let mut rt = ReservationTable::new(3).with_edge_collision(true);
    // Agent A runs 0 -> 2 and parks there forever.
    rt.add_path(0, &[0, 1, 2], true, false).unwrap();
    // Agent B starts on the far side; every escape is occupied in time.
    let planner = SpaceTimeAStar::new(&grid);
    let path = planner.find_path_with_depth_limit(2, 0, 10, &rt).unwrap();
    assert_eq!(path, vec![]);
}

#[test]
fn test_weight_paths_respect_start_time() {
    let mut rt = ReservationTable::new(3);
    rt.add_weight_path(4, &[0, 1, 2], 1.5).unwrap();
    assert_eq!(rt.additional_weight(4, 0), 1.5);
    assert_eq!(rt.additional_weight(5, 1), 1.5);
    assert_eq!(rt.additional_weight(6, 2), 1.5);
    assert_eq!(rt.additional_weight(4, 1), 0.0);
}
