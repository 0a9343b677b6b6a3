//! Score simulator
//!
//! Maps a configuration id to a fixed list of named synthetic measurements.
//! Each value is `adjusted_base(id, test) + uniform(0, variance)`, where the
//! adjusted base comes from two lookup tables (id -> multiplier and
//! (id, test) -> adjustment). Unknown ids run with a neutral multiplier.
//!
//! Runs are sequential: `run_many` awaits each configuration's artificial
//! delay before starting the next one.

pub mod runner;
pub mod tables;

pub use runner::{generate_result, ConfigurationRun, RunResult, ScoreSimulator};
pub use tables::{
    adjusted_base, multiplier_for, special_case_adjustment, startup_delay_ms, Adjustment, TestKind,
};
