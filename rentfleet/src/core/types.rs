//! Closed outcome codes for registry operations.
//!
//! These are ordinary values, not errors: callers branch on them as normal
//! control flow, and exhaustive matching keeps every precondition handled.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of adding a model, car, or driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOutcome {
    /// Entity inserted.
    Ok,
    /// A model with the same name is already registered.
    ModelExists,
    /// The car references a model that is not registered.
    NoModel,
    /// A car with the same registration number is already registered.
    CarExists,
    /// A driver with the same license id is already registered.
    DriverExists,
}

impl AddOutcome {
    pub fn is_ok(self) -> bool {
        self == AddOutcome::Ok
    }
}

impl fmt::Display for AddOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddOutcome::Ok => "ok",
            AddOutcome::ModelExists => "model_exists",
            AddOutcome::NoModel => "no_model",
            AddOutcome::CarExists => "car_exists",
            AddOutcome::DriverExists => "driver_exists",
        };
        f.write_str(name)
    }
}

/// Outcome of starting a rental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentOutcome {
    /// Rental started; an open record now exists for the car.
    Ok,
    /// No car with that registration number.
    NoCar,
    /// No driver with that license id.
    NoDriver,
    /// The car is flagged for removal and can no longer be rented.
    CarRemoved,
    /// The car is already out with another rental.
    CarInUse,
}

impl RentOutcome {
    pub fn is_ok(self) -> bool {
        self == RentOutcome::Ok
    }
}

impl fmt::Display for RentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RentOutcome::Ok => "ok",
            RentOutcome::NoCar => "no_car",
            RentOutcome::NoDriver => "no_driver",
            RentOutcome::CarRemoved => "car_removed",
            RentOutcome::CarInUse => "car_in_use",
        };
        f.write_str(name)
    }
}
