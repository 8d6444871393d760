use std::f64::consts::PI;

use linkage_core::{Guess, Observer, Profile, Vector};
use linkage_mechanism::{Mechanism, VectorLoop};
use linkage_observers::{HoldFailures, TraceObserver};
use linkage_solvers::sweep::{self, FailureKind, Status};

/// Ground 2, crank 1, coupler 1, output 0.5: the crank can only swing about
/// 0.81 rad either side of π before coupler and output pull straight.
fn short_linkage() -> Mechanism<VectorLoop> {
    let vectors = vec![
        Vector::fixed("O", "C", 2.0, PI),
        Vector::driven("O", "A", 1.0),
        Vector::unknown("A", "B", 1.0),
        Vector::unknown("C", "B", 0.5),
    ];
    let equation = VectorLoop::builder(&vectors)
        .plus(1)
        .plus(2)
        .minus(0)
        .minus(3)
        .build()
        .unwrap();

    // Sweeps from π to π + 1.5, past the toggle near π + 0.813.
    let n = 200;
    let positions = (0..n)
        .map(|i| PI + 1.5 * i as f64 / (n - 1) as f64)
        .collect();
    let profile = Profile::new(positions, vec![1.0; n], vec![0.0; n]).unwrap();
    let guess = Guess::positions(vec![PI, PI / 2.0]).unwrap();

    Mechanism::new(vectors, "O", equation, profile, guess).unwrap()
}

#[test]
fn toggle_is_reported_at_the_first_unreachable_sample() {
    let mut mechanism = short_linkage();
    let error = mechanism.iterate().unwrap_err();

    assert_eq!(error.sample(), Some(108));
    assert_eq!(error.kind(), Some(FailureKind::Convergence));
    assert_eq!(error.last_valid().map(|state| state.sample), Some(107));

    // Everything before the failure stays recorded; nothing after it is.
    assert_eq!(mechanism.resolved(), 108);
    for vector in mechanism.vectors() {
        assert_eq!(vector.angles().len(), 108);
    }
    assert!(mechanism.max_closure_residual().unwrap() < 1e-9);
}

#[test]
fn held_samples_repeat_the_last_valid_state() {
    let mut mechanism = short_linkage();
    let mut trace = TraceObserver::new();
    let mut hold = HoldFailures::new(usize::MAX);

    let status = mechanism
        .iterate_observed(|event: &sweep::Event<'_>| -> Option<sweep::Action> {
            trace.observe(event);
            hold.observe(event)
        })
        .unwrap();

    assert_eq!(status, Status::Complete);
    assert_eq!(mechanism.resolved(), 200);
    assert_eq!(mechanism.held(), (108..200).collect::<Vec<_>>().as_slice());
    assert_eq!(hold.held(), 92);
    assert_eq!(trace.solved(), 108);
    assert_eq!(trace.failed(), 92);

    let output = mechanism.vector(3).unwrap();
    let last_solved = output.angles()[107];
    assert!(output.angles()[108..].iter().all(|&a| a == last_solved));

    // Held samples keep their own driving input.
    let crank = mechanism.vector(1).unwrap();
    assert_eq!(crank.angles(), mechanism.profile().positions());
}

#[test]
fn stopping_at_the_failure_keeps_the_run_successful() {
    let mut mechanism = short_linkage();
    let status = mechanism
        .iterate_observed(|event: &sweep::Event<'_>| {
            matches!(event, sweep::Event::Failed { .. }).then_some(sweep::Action::StopEarly)
        })
        .unwrap();

    assert_eq!(status, Status::StoppedByObserver);
    assert_eq!(mechanism.resolved(), 108);
}

#[test]
fn iterating_again_replaces_the_results() {
    fn stop_at(last: usize) -> impl FnMut(&sweep::Event<'_>) -> Option<sweep::Action> {
        move |event| (event.sample() == last).then_some(sweep::Action::StopEarly)
    }

    let mut mechanism = short_linkage();

    mechanism.iterate_observed(stop_at(50)).unwrap();
    assert_eq!(mechanism.resolved(), 51);
    let first_run = mechanism.vector(2).unwrap().angles().to_vec();

    mechanism.iterate_observed(stop_at(20)).unwrap();
    assert_eq!(mechanism.resolved(), 21);
    assert_eq!(mechanism.vector(2).unwrap().angles(), &first_run[..21]);
}
