//! Errors returned by ride lifecycle operations.

use std::fmt;

use bevy_ecs::prelude::Entity;
use thiserror::Error;

use crate::ecs::RideId;

/// Which side of a ride attempted an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Rider,
    Driver,
}

impl Role {
    /// The party a rating from this role is addressed to.
    pub fn counterpart(self) -> Role {
        match self {
            Role::Rider => Role::Driver,
            Role::Driver => Role::Rider,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Rider => f.write_str("rider"),
            Role::Driver => f.write_str("driver"),
        }
    }
}

/// Operation that requires a completed ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RideAction {
    Rate,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Rider,
    Driver,
    Ride,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Rider => f.write_str("rider"),
            EntityKind::Driver => f.write_str("driver"),
            EntityKind::Ride => f.write_str("ride"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RideError {
    #[error("ride already accepted by another driver")]
    RideAlreadyAccepted { ride: RideId },
    #[error("{}", not_completed_message(.action))]
    RideNotCompleted { ride: RideId, action: RideAction },
    #[error("can not rate {} when you are not the {}", .role.counterpart(), .role)]
    InvalidRater { role: Role },
    #[error("no {kind} found for {entity:?}")]
    NotFound { kind: EntityKind, entity: Entity },
    #[error("score {score} outside allowed range {min}..={max}")]
    ScoreOutOfRange { score: i32, min: i32, max: i32 },
}

fn not_completed_message(action: &RideAction) -> &'static str {
    match action {
        RideAction::Rate => "can not rate when it is not completed",
        RideAction::Delete => "can not delete ride before it is completed",
    }
}

impl RideError {
    pub(crate) fn not_found(kind: EntityKind, entity: Entity) -> Self {
        RideError::NotFound { kind, entity }
    }
}
