//! Rider-side operations: requesting rides and rating drivers.

use tracing::debug;

use crate::ecs::{Participant, Rating, Ride, RideId, RideStatus, RiderId};
use crate::error::{EntityKind, RideAction, RideError, Role};
use crate::manager::RideManager;

impl RiderId {
    /// Create a pending ride to `destination` and register it with `manager`.
    ///
    /// The destination is not validated. Fails only if this rider does not
    /// belong to `manager`.
    pub fn request_ride(
        self,
        destination: impl Into<String>,
        manager: &mut RideManager,
    ) -> Result<RideId, RideError> {
        let ride = manager.add_ride(Ride::new(self, destination))?;
        debug!(rider = ?self.0, ride = ?ride.0, "ride requested");
        Ok(ride)
    }

    /// Rate the driver of a completed ride this rider took.
    ///
    /// Repeated calls record repeated ratings.
    pub fn rate_ride(
        self,
        ride: RideId,
        score: i32,
        manager: &mut RideManager,
    ) -> Result<(), RideError> {
        let record = manager.ride(ride)?;
        if record.rider() != self {
            return Err(RideError::InvalidRater { role: Role::Rider });
        }
        if record.status != RideStatus::Completed {
            return Err(RideError::RideNotCompleted {
                ride,
                action: RideAction::Rate,
            });
        }
        let driver = record
            .driver()
            .ok_or_else(|| RideError::not_found(EntityKind::Driver, ride.0))?;
        manager.config().check_score(score)?;

        driver.add_rating(Rating::new(score, driver.into(), self.into()), manager)?;
        debug!(rider = ?self.0, driver = ?driver.0, ride = ?ride.0, score, "rider rated driver");
        Ok(())
    }

    pub fn add_rating(self, rating: Rating, manager: &mut RideManager) -> Result<(), RideError> {
        manager.ratings_mut(Participant::Rider(self))?.push(rating);
        Ok(())
    }
}
