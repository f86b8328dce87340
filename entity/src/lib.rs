//! Wire models exchanged with the fitness-tracking service.
//!
//! Every request and response body the client sends or receives lives here so the
//! gateway and domain layers agree on one set of shapes.

pub mod activity_level;
pub mod exercises;
pub mod gender;
pub mod goal;
pub mod intensity;
pub mod messages;
pub mod physical_data;
pub mod recommendations;
pub mod users;

/// A type alias that represents the service's record id field data type.
/// The service hands out stringified document ids.
pub type Id = String;
