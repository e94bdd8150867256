//! `ca-agent`: a single simulated robot.
//!
//! An [`Agent<D>`] owns exactly one state vector and one [`Dynamics`] value.
//! The state can only change through [`Agent::step`], [`Agent::reset_to`]
//! and (for the speed parameter) [`Agent::halt`] / [`Agent::set_speed`].
//!
//! ```rust
//! use ca_agent::Agent;
//! use ca_dynamics::Unicycle;
//!
//! let mut agent = Agent::new(Unicycle::new(1.0), vec![0.0, 0.0, 0.0]).unwrap();
//! agent.step(1.0, &[0.0]).unwrap();
//! assert_eq!(agent.state()[0], 1.0);
//! ```
//!
//! [`Dynamics`]: ca_dynamics::Dynamics

pub mod agent;


pub use agent::Agent;
