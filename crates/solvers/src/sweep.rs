//! Continuation sweep over every sample of a driving profile.
//!
//! # Algorithm
//!
//! For each sample in order the sweep solves, in turn:
//!
//! 1. the unknown angles with [`newton`],
//! 2. the angular velocities with [`rates::velocity`],
//! 3. the angular accelerations with [`rates::acceleration`].
//!
//! Sample 0 is seeded with the caller's guesses. Every later sample is seeded
//! with the state solved at the previous sample, which keeps the solution on
//! one assembly branch and its angle series continuous.
//!
//! A sample either fully succeeds or fails as a whole. A failure ends the
//! sweep with [`Error::Sample`], carrying the last valid state, unless the
//! observer recovers.
//!
//! # Observer Events
//!
//! The sweep emits exactly one event per sample it reaches:
//!
//! - [`Event::Solved`] after a sample is solved
//! - [`Event::Failed`] when a sample fails, followed by [`Event::Held`] if the
//!   observer returned [`Action::HoldPrevious`]
//!
//! [`Action::StopEarly`] ends the sweep successfully after any event. Samples
//! that were solved or held before stopping, including the current one, are
//! part of the solution.

mod action;
mod config;
mod error;
mod event;
mod failure;
mod solution;
mod state;

pub use action::Action;
pub use config::Config;
pub use error::Error;
pub use event::Event;
pub use failure::{Failure, FailureKind};
pub use solution::{Solution, Status};
pub use state::SampleState;

use std::f64::consts::{PI, TAU};

use linkage_core::{Guess, LoopEquation, Motion, Observer, Profile};

use crate::{position::newton, rates};

/// Solves every sample of `profile` with continuation.
///
/// # Errors
///
/// Returns [`Error::Domain`] if the guesses do not match the equation's
/// unknowns, and [`Error::Sample`] if a sample fails without the observer
/// recovering.
pub fn solve<E, Obs>(
    equation: &E,
    profile: &Profile,
    guess: &Guess,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    E: LoopEquation,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    guess.check_len(equation.unknowns())?;

    let mut states: Vec<SampleState> = Vec::with_capacity(profile.len());
    let mut held = Vec::new();

    for sample in 0..profile.len() {
        let drive = profile.at(sample)?;

        match solve_sample(equation, sample, drive, states.last(), guess, config) {
            Ok((state, iters)) => {
                let action = observer.observe(&Event::Solved {
                    state: &state,
                    iters,
                });
                states.push(state);

                if let Some(Action::StopEarly) = action {
                    return Ok(stopped(states, held));
                }
            }
            Err(failure) => {
                let last_valid = states.last();
                let action = observer.observe(&Event::Failed {
                    sample,
                    failure: &failure,
                    last_valid,
                });

                match (action, last_valid) {
                    (Some(Action::StopEarly), _) => return Ok(stopped(states, held)),
                    (Some(Action::HoldPrevious), Some(previous)) => {
                        let state = SampleState {
                            sample,
                            drive,
                            ..previous.clone()
                        };
                        let action = observer.observe(&Event::Held {
                            state: &state,
                            failure: &failure,
                        });
                        states.push(state);
                        held.push(sample);

                        if let Some(Action::StopEarly) = action {
                            return Ok(stopped(states, held));
                        }
                    }
                    (_, last_valid) => {
                        return Err(Error::Sample {
                            sample,
                            last_valid: last_valid.cloned().map(Box::new),
                            failure,
                        });
                    }
                }
            }
        }
    }

    Ok(Solution {
        status: Status::Complete,
        states,
        held,
    })
}

/// Solves every sample of `profile` without observation.
///
/// # Errors
///
/// Returns an error under the same conditions as [`solve`]; every sample
/// failure is fatal.
pub fn solve_unobserved<E: LoopEquation>(
    equation: &E,
    profile: &Profile,
    guess: &Guess,
    config: &Config,
) -> Result<Solution, Error> {
    solve(equation, profile, guess, config, ())
}

fn stopped(states: Vec<SampleState>, held: Vec<usize>) -> Solution {
    Solution {
        status: Status::StoppedByObserver,
        states,
        held,
    }
}

/// Solves one sample, seeded from `previous` or from the guesses.
fn solve_sample<E: LoopEquation>(
    equation: &E,
    sample: usize,
    drive: Motion,
    previous: Option<&SampleState>,
    guess: &Guess,
    config: &Config,
) -> Result<(SampleState, usize), Failure> {
    let (angle_seed, velocity_seed, acceleration_seed) = match previous {
        Some(state) => (
            state.angles.as_slice(),
            state.velocities.as_slice(),
            state.accelerations.as_slice(),
        ),
        None => (guess.position(), guess.velocity(), guess.acceleration()),
    };

    let solution = newton::solve_unobserved(
        equation,
        sample,
        drive.position,
        angle_seed,
        &config.newton,
    )
    .map_err(Failure::Position)?;

    let mut angles = solution.angles;
    if previous.is_none() && config.normalize_initial {
        angles.iter_mut().for_each(|angle| *angle = wrap_angle(*angle));
    }

    let velocities = rates::velocity(
        equation,
        sample,
        &angles,
        &drive,
        velocity_seed,
        &config.rates,
    )
    .map_err(Failure::Velocity)?;

    let accelerations = rates::acceleration(
        equation,
        sample,
        &angles,
        &velocities,
        &drive,
        acceleration_seed,
        &config.rates,
    )
    .map_err(Failure::Acceleration)?;

    let state = SampleState {
        sample,
        drive,
        angles,
        velocities,
        accelerations,
    };
    Ok((state, solution.iters))
}

/// Wraps an angle into `(-π, π]`.
fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}
