pub mod config;
pub mod driver;
pub mod ecs;
pub mod error;
pub mod manager;
pub mod ride;
pub mod rider;
pub mod telemetry;
pub mod telemetry_export;
#[cfg(feature = "test-helpers")]
pub mod test_helpers;

pub use config::RatingConfig;
pub use ecs::{DriverId, Participant, Rating, Ride, RideId, RideStatus, RiderId};
pub use error::RideError;
pub use manager::RideManager;
