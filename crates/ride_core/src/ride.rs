//! Status transitions on tracked rides.

use tracing::debug;

use crate::ecs::{RideId, RideStatus};
use crate::error::RideError;
use crate::manager::RideManager;

impl RideId {
    pub fn status(self, manager: &RideManager) -> Result<RideStatus, RideError> {
        Ok(manager.ride(self)?.status)
    }

    /// Set the status to accepted regardless of the current status.
    pub fn mark_as_accepted(self, manager: &mut RideManager) -> Result<(), RideError> {
        manager.ride_mut(self)?.mark_as_accepted();
        debug!(ride = ?self.0, "ride accepted");
        Ok(())
    }

    /// Set the status to completed from any state, even without a driver.
    pub fn mark_as_completed(self, manager: &mut RideManager) -> Result<(), RideError> {
        manager.ride_mut(self)?.mark_as_completed();
        debug!(ride = ?self.0, "ride completed");
        Ok(())
    }
}
