//! Interrupt-side orchestration of the DSP primitives.
//!
//! `pipeline` holds the state both handlers share and the handlers themselves,
//! `handoff` the one value passed between them, `clock` the timer arithmetic
//! that orders them, and `scheduler` a host driver that replays that order.

pub mod clock;
pub mod handoff;
pub mod pipeline;
pub mod scheduler;
