//! Domain module
//!
//! Pure intake logic: nothing here reads the wall clock or talks to the
//! network.

pub mod value_objects;
pub mod calendar;
pub mod attachments;
pub mod progress;
pub mod inquiry;

pub use value_objects::*;
pub use calendar::*;
pub use attachments::*;
pub use progress::*;
pub use inquiry::*;
