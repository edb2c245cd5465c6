// src/lib.rs

// Publieke modules voor gebruik binnen de Rust-crate
pub mod batch;
pub mod config;
pub mod construct;
pub mod cover;
pub mod grasp;
pub mod instance;
pub mod local_search;
pub mod params;
pub mod rcl;
pub mod score;
pub mod solution;

#[cfg(feature = "python")]
mod python;

// Her-exporteer de belangrijkste types voor Rust-gebruikers
pub use grasp::{Grasp, GraspOutcome, Incumbent};
pub use instance::{Instance, InstanceError};
pub use params::{ConstructionMethod, Params, SearchMethod};
pub use solution::Solution;
