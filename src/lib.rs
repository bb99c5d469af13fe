//! Adventuria - a discrete-time world simulation

pub mod core;
pub mod entity;
pub mod simulation;
pub mod world;
