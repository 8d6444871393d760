use std::f64::consts::PI;

use linkage_core::{DomainError, Guess, Joint, Length, LoopFn, NoLoop, Profile, Vector};
use linkage_mechanism::{Error, Mechanism};

fn profile(n: usize) -> Profile {
    Profile::constant_velocity(0.0, 1.0, n, 1.0).unwrap()
}

fn two_unknowns() -> LoopFn<impl Fn(&[f64], f64) -> [f64; 2], [f64; 2]> {
    LoopFn::new(2, |x: &[f64], input: f64| {
        [
            input.cos() + 3.0 * x[0].cos() - x[1].cos() + 3.0,
            input.sin() + 3.0 * x[0].sin() - x[1].sin(),
        ]
    })
}

fn four_bar(crank: Vector) -> Vec<Vector> {
    vec![
        crank,
        Vector::unknown("A", "B", 3.0),
        Vector::fixed("O", "C", 3.0, PI),
        Vector::unknown("C", "B", 1.0),
    ]
}

fn guess() -> Guess {
    Guess::positions(vec![PI, 0.0]).unwrap()
}

#[test]
fn accepts_a_consistent_mechanism() {
    let mechanism = Mechanism::new(
        four_bar(Vector::driven("O", "A", 1.0)),
        "O",
        two_unknowns(),
        profile(5),
        guess(),
    )
    .unwrap();

    assert_eq!(mechanism.samples(), 5);
    assert_eq!(mechanism.resolved(), 0);
    assert_eq!(mechanism.origin(), &Joint::new("O"));
    assert_eq!(mechanism.joints().len(), 4);
}

#[test]
fn requires_exactly_one_driven_vector() {
    let none = Mechanism::new(
        four_bar(Vector::fixed("O", "A", 1.0, 0.0)),
        "O",
        NoLoop,
        profile(5),
        Guess::positions(vec![]).unwrap(),
    );
    assert!(matches!(none, Err(DomainError::DrivenCount { found: 0 })));

    let mut vectors = four_bar(Vector::driven("O", "A", 1.0));
    vectors.push(Vector::driven("B", "D", 1.0));
    let two = Mechanism::new(vectors, "O", two_unknowns(), profile(5), guess());
    assert!(matches!(two, Err(DomainError::DrivenCount { found: 2 })));
}

#[test]
fn unknown_vectors_must_match_the_equation() {
    let result = Mechanism::new(
        four_bar(Vector::driven("O", "A", 1.0)),
        "O",
        NoLoop,
        profile(5),
        guess(),
    );

    assert!(matches!(
        result,
        Err(DomainError::CountMismatch {
            what: "unknown vectors",
            expected: 0,
            found: 2,
        })
    ));
}

#[test]
fn guesses_must_match_the_unknowns() {
    let result = Mechanism::new(
        four_bar(Vector::driven("O", "A", 1.0)),
        "O",
        two_unknowns(),
        profile(5),
        Guess::positions(vec![PI]).unwrap(),
    );

    assert!(matches!(
        result,
        Err(DomainError::CountMismatch {
            what: "guesses",
            expected: 2,
            found: 1,
        })
    ));
}

#[test]
fn varying_lengths_must_cover_every_sample() {
    let short = Profile::new(vec![1.0; 3], vec![0.0; 3], vec![0.0; 3]).unwrap();
    let result = Mechanism::new(
        four_bar(Vector::driven("O", "A", Length::Varying(short))),
        "O",
        two_unknowns(),
        profile(5),
        guess(),
    );

    assert!(matches!(
        result,
        Err(DomainError::CountMismatch {
            what: "varying length samples",
            expected: 5,
            found: 3,
        })
    ));
}

#[test]
fn lengths_must_be_non_negative() {
    let result = Mechanism::new(
        four_bar(Vector::driven("O", "A", -1.0)),
        "O",
        two_unknowns(),
        profile(5),
        guess(),
    );

    assert!(matches!(
        result,
        Err(DomainError::NegativeLength { sample: 0, .. })
    ));
}

#[test]
fn fixed_angles_must_be_finite() {
    let vectors = vec![
        Vector::driven("O", "A", 1.0),
        Vector::unknown("A", "B", 3.0),
        Vector::fixed("O", "C", 3.0, f64::NAN),
        Vector::unknown("C", "B", 1.0),
    ];
    let result = Mechanism::new(vectors, "O", two_unknowns(), profile(5), guess());

    assert!(matches!(
        result,
        Err(DomainError::NonFinite {
            what: "fixed angle",
            ..
        })
    ));
}

#[test]
fn joints_must_connect_to_the_origin() {
    let missing = Mechanism::new(
        four_bar(Vector::driven("O", "A", 1.0)),
        "Z",
        two_unknowns(),
        profile(5),
        guess(),
    );
    assert!(matches!(missing, Err(DomainError::UnknownJoint(name)) if name == "Z"));

    let mut vectors = four_bar(Vector::driven("O", "A", 1.0));
    vectors.push(Vector::fixed("P", "Q", 1.0, 0.0));
    let disconnected = Mechanism::new(vectors, "O", two_unknowns(), profile(5), guess());
    assert!(matches!(disconnected, Err(DomainError::Disconnected(name)) if name == "P"));
}

#[test]
fn profiles_reject_mismatched_sequences() {
    let result = Profile::new(vec![0.0; 4], vec![0.0; 4], vec![0.0; 3]);

    assert_eq!(
        result,
        Err(DomainError::ProfileMismatch {
            position: 4,
            velocity: 4,
            acceleration: 3,
        })
    );
}

#[test]
fn results_are_out_of_range_before_iterating() {
    let mechanism = Mechanism::new(
        four_bar(Vector::driven("O", "A", 1.0)),
        "O",
        two_unknowns(),
        profile(5),
        guess(),
    )
    .unwrap();

    assert_eq!(
        mechanism.joint_positions(0),
        Err(DomainError::SampleOutOfRange { sample: 0, len: 0 })
    );
    assert!(matches!(
        mechanism.closure_residual(0),
        Err(Error::Domain(DomainError::SampleOutOfRange { .. }))
    ));
    assert_eq!(mechanism.frames().count(), 0);
    assert_eq!(mechanism.bounds(), None);
}
