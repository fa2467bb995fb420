//! API Routes

pub mod health;
pub mod lead;
pub mod locations;
