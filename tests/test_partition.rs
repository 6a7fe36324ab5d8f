use mandelsweep::partition::{partition, WorkAssignment};
use rand::Rng;

/// Check that the assignments cover every row of `height` exactly once.
fn assert_exact_cover(height: usize, assignments: &[WorkAssignment]) {
    let mut owners = vec![0usize; height];
    for a in assignments {
        for row in a.rows() {
            owners[row] += 1;
        }
    }
    assert!(
        owners.iter().all(|&n| n == 1),
        "height {} threads {}: rows not covered exactly once",
        height,
        assignments.len()
    );
}

#[test]
fn test_partition_completeness() {
    for height in 1..=200 {
        for num_threads in 1..=32 {
            let assignments = partition(height, num_threads, 32).unwrap();
            assert_eq!(assignments.len(), num_threads);
            assert_exact_cover(height, &assignments);
        }
    }
}

#[test]
fn test_partition_balance() {
    for height in 1..=200 {
        for num_threads in 1..=32 {
            let assignments = partition(height, num_threads, 32).unwrap();
            let max = assignments.iter().map(|a| a.row_count).max().unwrap();
            let min = assignments.iter().map(|a| a.row_count).min().unwrap();
            assert!(max - min <= 1);
        }
    }
}

#[test]
fn test_partition_random_heights() {
    let mut rng = rand::thread_rng();
    for _ in 0..500 {
        let height = rng.gen_range(1..5000);
        let num_threads = rng.gen_range(1..=32);
        let assignments = partition(height, num_threads, 32).unwrap();
        assert_exact_cover(height, &assignments);

        // Blocks are contiguous and in thread order.
        let mut next = 0;
        for (i, a) in assignments.iter().enumerate() {
            assert_eq!(a.thread_id, i);
            assert_eq!(a.num_threads, num_threads);
            assert_eq!(a.start_row, next);
            next = a.end_row();
        }
        assert_eq!(next, height);
    }
}

#[test]
fn test_assignment_is_independent_of_the_others() {
    let all = partition(1200, 7, 32).unwrap();
    for (i, a) in all.iter().enumerate() {
        assert_eq!(WorkAssignment::new(i, 7, 1200), *a);
    }
}
