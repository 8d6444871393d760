//! Sweeps a parallelogram four-bar through one crank turn and prints the
//! output link's motion as CSV.
//!
//! The linkage passes a change point at half a turn and continues on the
//! crossed branch from there.
//!
//! Solver events are logged to stderr.

use std::f64::consts::{PI, TAU};

use linkage_core::{Guess, Profile, Vector};
use linkage_mechanism::{Mechanism, VectorLoop};
use linkage_observers::TraceObserver;
use tracing::Level;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    // O: crank pivot, C: output pivot, A: crank end, B: coupler-output joint.
    let vectors = vec![
        Vector::driven("O", "A", 1.0),
        Vector::unknown("A", "B", 3.0),
        Vector::fixed("O", "C", 3.0, PI),
        Vector::unknown("C", "B", 1.0),
    ];
    let equation = VectorLoop::builder(&vectors)
        .plus(0)
        .plus(1)
        .minus(2)
        .minus(3)
        .build()?;

    let samples = 360;
    let eps = 1e-3;
    let positions = (0..samples)
        .map(|i| eps + (TAU - 2.0 * eps) * i as f64 / (samples - 1) as f64)
        .collect();
    let times = (0..samples)
        .map(|i| i as f64 / (samples - 1) as f64)
        .collect();
    let profile =
        Profile::new(positions, vec![TAU; samples], vec![0.0; samples])?.with_times(times)?;

    let guess = Guess::new(
        vec![45.0_f64.to_radians(), 90.0_f64.to_radians()],
        vec![100.0_f64.to_radians(); 2],
        vec![100.0_f64.to_radians(); 2],
    )?;

    let mut mechanism = Mechanism::new(vectors, "O", equation, profile, guess)?;
    let mut trace = TraceObserver::new();
    mechanism.iterate_observed(&mut trace)?;

    let output = mechanism
        .find(&"C".into(), &"B".into())
        .ok_or("missing output link")?;
    println!("time,theta,omega,alpha");
    for frame in mechanism.frames() {
        let i = frame.sample;
        println!(
            "{:.6},{:.6},{:.6},{:.6}",
            frame.time.unwrap_or(i as f64),
            output.angles()[i],
            output.velocities()[i],
            output.accelerations()[i],
        );
    }

    if let Some(bounds) = mechanism.bounds() {
        eprintln!(
            "{} samples, joints within {:.3} x {:.3}, max closure residual {:.2e}",
            trace.solved(),
            bounds.width(),
            bounds.height(),
            mechanism.max_closure_residual()?,
        );
    }
    Ok(())
}
