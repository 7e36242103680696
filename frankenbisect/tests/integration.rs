//! Facade-level integration tests exercising the full reduction pipeline.

use std::cell::{Cell, RefCell};

use frankenbisect::{
    BisectError, BisectResult, Bisector, Oracle, RecordingObserver, Verdict,
};

/// Reproduces the failure exactly when every member of `required` survives
/// in the candidate, counting evaluations and recording every candidate.
struct RequiredItems {
    required: Vec<i32>,
    calls: Cell<usize>,
    history: RefCell<Vec<Vec<i32>>>,
}

impl RequiredItems {
    fn new(required: &[i32]) -> Self {
        Self {
            required: required.to_vec(),
            calls: Cell::new(0),
            history: RefCell::new(Vec::new()),
        }
    }
}

impl Oracle<i32> for RequiredItems {
    fn evaluate(&self, candidate: &[i32]) -> BisectResult<Verdict> {
        self.calls.set(self.calls.get() + 1);
        self.history.borrow_mut().push(candidate.to_vec());
        let all_present = self.required.iter().all(|item| candidate.contains(item));
        Ok(Verdict::from_success(!all_present))
    }
}

#[test]
fn isolates_a_single_culprit_in_five_calls() {
    let oracle = RequiredItems::new(&[2]);
    let reduced = Bisector::new().run(&oracle, &[1, 2, 3, 4, 5]).unwrap();
    assert_eq!(reduced, vec![2]);
    assert_eq!(oracle.calls.get(), 5);
}

#[test]
fn isolates_a_straddling_pair_in_nine_calls() {
    let oracle = RequiredItems::new(&[1, 5]);
    let reduced = Bisector::new().run(&oracle, &[1, 2, 3, 4, 5]).unwrap();
    assert_eq!(reduced, vec![1, 5]);
    assert_eq!(oracle.calls.get(), 9);
}

#[test]
fn isolates_three_culprits_in_nine_calls() {
    let oracle = RequiredItems::new(&[1, 3, 5]);
    let reduced = Bisector::new().run(&oracle, &[1, 2, 3, 4, 5]).unwrap();
    assert_eq!(reduced, vec![1, 3, 5]);
    assert_eq!(oracle.calls.get(), 9);
}

#[test]
fn two_million_items_reduce_to_four_culprits_in_sixty_nine_calls() {
    let items: Vec<i32> = (-1_000_000..1_000_000).collect();
    let oracle = RequiredItems::new(&[-5, 1, 3, 5]);
    let reduced = Bisector::new().run(&oracle, &items).unwrap();
    assert_eq!(reduced, vec![-5, 1, 3, 5]);
    // Logarithmic in the input size: two million items cost 69 calls.
    assert_eq!(oracle.calls.get(), 69);
}

#[test]
fn passing_full_input_is_rejected_up_front() {
    let oracle = |_: &[i32]| Ok(Verdict::Success);
    let err = Bisector::new().run(&oracle, &[1, 2, 3]).unwrap_err();
    assert!(matches!(err, BisectError::FullInputSucceeded));
}

#[test]
fn failing_empty_input_is_rejected_up_front() {
    // Fails on everything, the empty candidate included.
    let oracle = |_: &[i32]| Ok(Verdict::FailureReproduced);
    let err = Bisector::new().run(&oracle, &[1, 2, 3]).unwrap_err();
    assert!(matches!(err, BisectError::EmptyInputFailed));
}

#[test]
fn result_is_an_order_preserving_subsequence_that_still_fails() {
    let items: Vec<i32> = (0..64).collect();
    let oracle = RequiredItems::new(&[7, 30, 31, 60]);
    let reduced = Bisector::new().run(&oracle, &items).unwrap();

    assert!(is_subsequence(&reduced, &items));
    assert!(matches!(
        oracle.evaluate(&reduced).unwrap(),
        Verdict::FailureReproduced
    ));
}

#[test]
fn repeated_runs_are_byte_for_byte_identical() {
    let run = || {
        let items: Vec<i32> = (0..100).collect();
        let oracle = RequiredItems::new(&[13, 87]);
        let reduced = Bisector::new().run(&oracle, &items).unwrap();
        (reduced, oracle.calls.get(), oracle.history.into_inner())
    };
    let (reduced_a, calls_a, history_a) = run();
    let (reduced_b, calls_b, history_b) = run();
    assert_eq!(reduced_a, reduced_b);
    assert_eq!(calls_a, calls_b);
    assert_eq!(history_a, history_b);
}

#[test]
fn recording_observer_captures_the_descent() {
    let oracle = RequiredItems::new(&[1, 5]);
    let mut observer = RecordingObserver::new();
    let reduced = Bisector::new()
        .run_observed(&oracle, &[1, 2, 3, 4, 5], &mut observer)
        .unwrap();
    assert_eq!(reduced, vec![1, 5]);
    assert!(observer.steps.iter().any(|step| step.depth > 0));

    let jsonl = observer.steps_to_jsonl();
    assert_eq!(jsonl.lines().count(), observer.steps.len());
}

fn is_subsequence(needle: &[i32], haystack: &[i32]) -> bool {
    let mut remaining = needle.iter();
    let mut next = remaining.next();
    for item in haystack {
        if Some(item) == next {
            next = remaining.next();
        }
    }
    next.is_none()
}
