use floodgrid::cell::Cell;
use floodgrid::grid::Grid;

fn ab_grid() -> Grid {
    let mut g = Grid::with_capacity(8, 8);
    g.set(3, 2).unwrap();
    g.init("AAB\nABB".as_bytes()).unwrap();
    g
}

#[test]
fn conn_area_counts_both_regions() {
    let mut g = ab_grid();

    g.refresh();
    assert_eq!(g.conn_area(Cell::new(0, 0)), 3);

    g.refresh();
    assert_eq!(g.conn_area(Cell::new(2, 0)), 3);
}

#[test]
fn conn_area_from_an_invalid_start_is_zero() {
    let mut g = ab_grid();
    g.refresh();
    assert_eq!(g.conn_area(Cell::INVALID), 0);
    assert_eq!(g.conn_area(Cell::new(10, 10)), 0);
}

#[test]
fn refresh_is_idempotent() {
    let mut g = ab_grid();

    g.refresh();
    let once = g.conn_area(Cell::new(0, 0));

    g.refresh();
    g.refresh();
    for y in 0..2 {
        for x in 0..3 {
            assert!(!g.done(Cell::new(x, y)).unwrap());
        }
    }
    assert_eq!(g.conn_area(Cell::new(0, 0)), once);
}

#[test]
fn stat_counts_regardless_of_visited_state() {
    let mut g = ab_grid();
    assert_eq!(g.stat('A'), 3);
    assert_eq!(g.stat('B'), 3);
    assert_eq!(g.stat('C'), 0);

    g.refresh();
    g.conn_area(Cell::new(0, 0));
    assert_eq!(g.stat('A'), 3);
}

#[test]
fn next_drives_enumeration_to_the_sentinel() {
    let mut g = ab_grid();
    g.refresh();

    let mut components = 0;
    loop {
        let c = g.next('A');
        if c == Cell::INVALID {
            break;
        }
        assert!(g.valid(c));
        g.conn_area(c);
        components += 1;
    }
    assert_eq!(components, 1);
}

#[test]
fn next_finds_each_component_once() {
    let mut g = Grid::with_capacity(4, 4);
    g.set(3, 3).unwrap();
    g.init("ABA\nBBB\nABA".as_bytes()).unwrap();
    g.refresh();

    let mut sizes = Vec::new();
    loop {
        let c = g.next('A');
        if c == Cell::INVALID {
            break;
        }
        sizes.push(g.conn_area(c));
    }
    // Four isolated corner cells, discovered row-major.
    assert_eq!(sizes, vec![1, 1, 1, 1]);
    assert_eq!(g.stat('A'), 4);
}

#[test]
fn walk_emits_post_order_in_the_fixed_neighbor_order() {
    let mut g = Grid::with_capacity(4, 4);
    g.set(2, 2).unwrap();
    g.init("AA\nAA".as_bytes()).unwrap();
    g.refresh();

    let mut trace = Vec::new();
    g.walk(Cell::new(0, 0), |_, _| true, |_, c| trace.push((c.x, c.y)));

    // Exploration order from (0,0) under `+y, +x, -x, -y`:
    // (0,0) -> (0,1) -> (1,1) -> (1,0); post-order unwinds leaf-first.
    assert_eq!(trace, vec![(1, 0), (1, 1), (0, 1), (0, 0)]);
}

#[test]
fn walk_skips_rejected_cells_without_marking_them() {
    let mut g = ab_grid();
    g.refresh();

    let mut visited = Vec::new();
    g.walk(
        Cell::new(0, 0),
        |g2, c| g2.get(c) == Some('A'),
        |_, c| visited.push((c.x, c.y)),
    );
    assert_eq!(visited.len(), 3);

    // The bordering 'B' cells were tested but stay unvisited.
    assert!(!g.done(Cell::new(2, 0)).unwrap());
    assert!(!g.done(Cell::new(1, 1)).unwrap());
}

#[test]
fn walk_on_a_visited_start_is_a_no_op() {
    let mut g = ab_grid();
    g.refresh();
    g.conn_area(Cell::new(0, 0));

    let mut count = 0;
    g.walk(Cell::new(0, 0), |_, _| true, |_, _| count += 1);
    assert_eq!(count, 0);
}

#[test]
fn walk_on_an_invalid_start_is_a_no_op() {
    let mut g = ab_grid();
    g.refresh();

    let mut count = 0;
    g.walk(Cell::INVALID, |_, _| true, |_, _| count += 1);
    assert_eq!(count, 0);
}

#[test]
fn census_sizes_every_component() {
    let mut g = Grid::with_capacity(4, 4);
    g.set(3, 3).unwrap();
    g.init("ABA\nBBB\nABA".as_bytes()).unwrap();

    let census = g.census();
    assert_eq!(census[&'A'], vec![1, 1, 1, 1]);
    assert_eq!(census[&'B'], vec![5]);
    assert_eq!(census.len(), 2);
}

#[test]
fn walk_floods_a_large_component_without_recursing() {
    let mut g = Grid::with_capacity(256, 256);
    let src = "X".repeat(256 * 256);
    g.init(src.as_bytes()).unwrap();

    g.refresh();
    assert_eq!(g.conn_area(Cell::new(0, 0)), 256 * 256);
}
