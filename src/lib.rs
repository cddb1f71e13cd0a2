//! Core calculation and chat logic as a library so the CLI and the GUI
//! front-ends share the same code.

pub mod app;
pub mod calc;
pub mod chat;
pub mod config;
pub mod physics;
pub mod plot;
pub mod symbolic;
pub mod topic;
