//! Test-only fixtures for building sample fleets.

use chrono::NaiveDate;

use crate::core::registry::Registry;
use crate::fleet::{Car, Driver, Model};

pub const MODEL_NAME: &str = "Sprint";
pub const REG_NUMBER: &str = "R-100";
pub const LICENSE: u64 = 1000;

/// Canonical model used across tests: 50 litre tank, 200 per day.
pub fn sample_model() -> Model {
    Model::new(MODEL_NAME, 50, "Vornado", "Freedonia", 200)
}

/// Black car of the sample model with the given registration number.
pub fn sample_car(reg_number: &str) -> Car {
    Car::new(reg_number, "black", MODEL_NAME)
}

/// Driver with deterministic identity fields.
pub fn sample_driver(license_id: u64) -> Driver {
    Driver::new(license_id, "Mara Voss", 1990, "555-0101")
}

/// Registry pre-loaded with the sample model, one car ([`REG_NUMBER`]), and
/// one driver ([`LICENSE`]).
pub fn stocked_registry() -> Registry {
    let mut registry = Registry::new();
    assert!(registry.add_model(sample_model()).is_ok());
    assert!(registry.add_car(sample_car(REG_NUMBER)).is_ok());
    assert!(registry.add_driver(sample_driver(LICENSE)).is_ok());
    registry
}

/// Shorthand for a calendar date that is known to be valid.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}
