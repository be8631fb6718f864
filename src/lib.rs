//! Resolutions mailer — campaign-window resolution and exactly-once dispatch.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod roster;
pub mod run;
pub mod schedule;
pub mod store;
pub mod topics;
pub mod transmit;
