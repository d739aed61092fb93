//! Driver-side operations: claiming rides and rating riders.

use tracing::debug;

use crate::ecs::{DriverId, Participant, Rating, RideId, RideStatus};
use crate::error::{RideAction, RideError, Role};
use crate::manager::RideManager;

impl DriverId {
    /// Claim a ride that has no driver yet and mark it accepted.
    ///
    /// The ride's current status is not checked: a driverless ride that was
    /// already completed is moved back to accepted.
    pub fn accept_ride(self, ride: RideId, manager: &mut RideManager) -> Result<(), RideError> {
        if manager.ride(ride)?.driver().is_some() {
            return Err(RideError::RideAlreadyAccepted { ride });
        }
        manager.driver(self)?;

        let mut record = manager.ride_mut(ride)?;
        record.assign_driver(self);
        record.mark_as_accepted();
        debug!(driver = ?self.0, ride = ?ride.0, "driver accepted ride");
        Ok(())
    }

    /// Rate the rider of a completed ride this driver drove.
    ///
    /// Repeated calls record repeated ratings.
    pub fn rate_ride(
        self,
        ride: RideId,
        score: i32,
        manager: &mut RideManager,
    ) -> Result<(), RideError> {
        let record = manager.ride(ride)?;
        if record.driver() != Some(self) {
            return Err(RideError::InvalidRater { role: Role::Driver });
        }
        if record.status != RideStatus::Completed {
            return Err(RideError::RideNotCompleted {
                ride,
                action: RideAction::Rate,
            });
        }
        let rider = record.rider();
        manager.config().check_score(score)?;

        rider.add_rating(Rating::new(score, rider.into(), self.into()), manager)?;
        debug!(driver = ?self.0, rider = ?rider.0, ride = ?ride.0, score, "driver rated rider");
        Ok(())
    }

    pub fn add_rating(self, rating: Rating, manager: &mut RideManager) -> Result<(), RideError> {
        manager.ratings_mut(Participant::Driver(self))?.push(rating);
        Ok(())
    }
}
