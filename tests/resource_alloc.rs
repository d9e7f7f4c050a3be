use stats_alloc::{Region, StatsAlloc, INSTRUMENTED_SYSTEM};
use std::alloc::System;

#[global_allocator]
static GLOBAL: &StatsAlloc<System> = &INSTRUMENTED_SYSTEM;

fn ring_matrix(n: usize) -> rwr::AdjacencyMatrix {
    let mut data = vec![0.0; n * n];
    for j in 0..n {
        data[((j + 1) % n) * n + j] = 1.0;
        data[((j + n - 1) % n) * n + j] = 1.0;
    }
    rwr::AdjacencyMatrix::new(n, data).unwrap()
}

#[test]
fn iterations_do_not_allocate() {
    // Setup allocates the transition matrix and state buffers once. Each step swaps buffers,
    // so a run with many more steps must not allocate more.
    //
    // We count allocations, not RSS (portable across OSes/CI).
    let n = 101usize;
    let adj = ring_matrix(n);
    let mut seeds = vec![0.0; n];
    seeds[0] = 1.0;

    let loose = rwr::RwrConfig { restart: 0.05, tolerance: 1e-2, max_iterations: 100_000 };
    let tight = rwr::RwrConfig { tolerance: 1e-13, ..loose };

    // Warm up so one-time lazy initialization (e.g. tracing callsite registration) is not
    // attributed to the first measured run.
    rwr::random_walk_with_restart(&adj, &seeds, loose).unwrap();

    let r_loose = Region::new(&GLOBAL);
    let short = rwr::random_walk_with_restart(&adj, &seeds, loose).unwrap();
    let s_loose = r_loose.change();

    let r_tight = Region::new(&GLOBAL);
    let long = rwr::random_walk_with_restart(&adj, &seeds, tight).unwrap();
    let s_tight = r_tight.change();

    assert!(
        long.steps > 4 * short.steps,
        "expected many more steps at the tight threshold (short={}, long={})",
        short.steps,
        long.steps
    );
    assert_eq!(
        s_loose.allocations, s_tight.allocations,
        "allocation count must not depend on the number of steps"
    );
}
