//! MedShare vision API.
//!
//! A thin HTTP service that forwards uploaded medicine images (handwritten
//! prescriptions, medicine boxes) to a generative vision model and
//! post-processes the returned text into structured JSON fields.
//!
//! Process-wide state (selected model, dictionary index) is built once in
//! `main` and handed to the router — nothing is mutated after startup.

pub mod api;
pub mod config;
pub mod core_state;
pub mod extract;
pub mod model;
