//! Climbing competition leaderboard: fetch score records, aggregate them per
//! climber, and rank climbers by the sum of their best sends.

pub mod config;
pub mod feed;
pub mod fetch;
pub mod mock;
pub mod output;
pub mod roster;
pub mod scoring;
pub mod standings;
pub mod stderr_buffer;
pub mod tui;
