use mandelsweep::fractal::buffer::IterationBuffer;
use mandelsweep::verify::{verify, Mismatch, VerifyError};

#[test]
fn test_verify_reports_single_mismatch() {
    let mut gold = IterationBuffer::new(4, 4);
    let mut candidate = IterationBuffer::new(4, 4);
    gold.set(2, 1, 3);
    candidate.set(2, 1, 5);

    let err = verify(&gold, &candidate).unwrap_err();
    assert_eq!(
        err,
        VerifyError::Pixel(Mismatch {
            row: 2,
            col: 1,
            expected: 3,
            actual: 5
        })
    );
    assert_eq!(err.to_string(), "Mismatch : [2][1], Expected : 3, Actual : 5");
}

#[test]
fn test_verify_stops_at_first_mismatch() {
    let gold = IterationBuffer::new(5, 3);
    let mut candidate = IterationBuffer::new(5, 3);
    candidate.set(2, 4, 9);
    candidate.set(1, 3, 1);
    candidate.set(1, 0, 2);

    match verify(&gold, &candidate) {
        Err(VerifyError::Pixel(m)) => {
            assert_eq!((m.row, m.col, m.expected, m.actual), (1, 0, 0, 2));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_verify_equal_buffers() {
    let mut gold = IterationBuffer::new(16, 9);
    gold.fill(42);
    let candidate = gold.clone();
    assert_eq!(verify(&gold, &candidate), Ok(()));
}

#[test]
fn test_verify_rejects_different_sizes() {
    let gold = IterationBuffer::new(4, 4);
    let candidate = IterationBuffer::new(2, 8);
    assert_eq!(
        verify(&gold, &candidate),
        Err(VerifyError::Dimensions {
            expected: (4, 4),
            actual: (2, 8)
        })
    );
}
