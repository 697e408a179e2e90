//! Rental-fleet registry CLI.
//!
//! Every command restores the registry from the snapshot file, applies one
//! operation, persists the result when state changed, and prints the
//! outcome. Business rejections exit with [`exit_codes::REJECTED`] so
//! scripts can branch on them without parsing output.

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use rentfleet::exit_codes;
use rentfleet::fleet::{Car, Driver, Model, RentRecord};
use rentfleet::io::config::load_config;
use rentfleet::io::store;
use rentfleet::logging;

#[derive(Parser)]
#[command(name = "rentfleet", version, about = "Embedded rental-fleet registry")]
struct Cli {
    /// Snapshot file holding the registry state.
    #[arg(long, global = true, default_value = "fleet.json")]
    store: PathBuf,

    /// TOML file overriding pricing and threshold defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register a vehicle model.
    AddModel {
        name: String,
        /// Fuel tank capacity in litres.
        tank_capacity: u32,
        manufacturer: String,
        country: String,
        price_per_day: u32,
    },
    /// Register a car; its model must already exist.
    AddCar {
        reg_number: String,
        color: String,
        model_name: String,
    },
    /// Register a driver.
    AddDriver {
        license_id: u64,
        name: String,
        birth_year: i32,
        phone: String,
    },
    /// Rent a car to a driver.
    Rent {
        reg_number: String,
        license_id: u64,
        /// Rental start date (YYYY-MM-DD).
        rent_date: NaiveDate,
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        rent_days: u32,
    },
    /// Return a rented car, reporting damage and tank fill percentages.
    Return {
        reg_number: String,
        license_id: u64,
        return_date: NaiveDate,
        damage_percent: u32,
        tank_percent: u32,
    },
    /// Remove a car; removal is deferred while the car is out.
    RemoveCar { reg_number: String },
    /// Remove a model and every removable car of it.
    RemoveModel { name: String },
    /// Look up a model by name.
    ShowModel { name: String },
    /// Look up a car by registration number.
    ShowCar { reg_number: String },
    /// Look up a driver by license id.
    ShowDriver { license_id: u64 },
    /// List available (not in use) cars of a model.
    CarsByModel { name: String },
    /// List distinct cars a driver has ever rented.
    CarsByDriver { license_id: u64 },
    /// List distinct drivers who have ever rented a car.
    DriversByCar { reg_number: String },
    /// List rent records whose start date lies in [from, to).
    Records { from: NaiveDate, to: NaiveDate },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let mut registry = store::restore(&cli.store);
    if let Some(path) = &cli.config {
        registry.set_config(load_config(path)?);
    }

    let mut mutated = false;
    let code = match cli.command {
        Command::AddModel {
            name,
            tank_capacity,
            manufacturer,
            country,
            price_per_day,
        } => {
            let outcome = registry.add_model(Model::new(
                &name,
                tank_capacity,
                &manufacturer,
                &country,
                price_per_day,
            ));
            println!("{outcome}");
            mutated = outcome.is_ok();
            rejection_code(outcome.is_ok())
        }
        Command::AddCar {
            reg_number,
            color,
            model_name,
        } => {
            let outcome = registry.add_car(Car::new(&reg_number, &color, &model_name));
            println!("{outcome}");
            mutated = outcome.is_ok();
            rejection_code(outcome.is_ok())
        }
        Command::AddDriver {
            license_id,
            name,
            birth_year,
            phone,
        } => {
            let outcome = registry.add_driver(Driver::new(license_id, &name, birth_year, &phone));
            println!("{outcome}");
            mutated = outcome.is_ok();
            rejection_code(outcome.is_ok())
        }
        Command::Rent {
            reg_number,
            license_id,
            rent_date,
            rent_days,
        } => {
            let outcome = registry.rent_car(&reg_number, license_id, rent_date, rent_days);
            println!("{outcome}");
            mutated = outcome.is_ok();
            rejection_code(outcome.is_ok())
        }
        Command::Return {
            reg_number,
            license_id,
            return_date,
            damage_percent,
            tank_percent,
        } => match registry.return_car(
            &reg_number,
            license_id,
            return_date,
            damage_percent,
            tank_percent,
        ) {
            None => {
                println!("no matching active rental");
                exit_codes::REJECTED
            }
            Some(data) => {
                mutated = true;
                match &data.records {
                    Some(records) => {
                        println!("returned and removed, {} records purged", records.len());
                    }
                    None => println!("returned, condition {:?}", data.car.state),
                }
                exit_codes::OK
            }
        },
        Command::RemoveCar { reg_number } => match registry.remove_car(&reg_number) {
            None => {
                println!("nothing to remove");
                exit_codes::REJECTED
            }
            Some(data) => {
                mutated = true;
                match &data.records {
                    Some(records) => println!("removed, {} records purged", records.len()),
                    None => println!("removal deferred until return"),
                }
                exit_codes::OK
            }
        },
        Command::RemoveModel { name } => {
            // idle cars get purged, in-use unflagged cars get newly flagged;
            // only in-use already-flagged cars leave the state untouched
            mutated = registry
                .cars_of_model(&name)
                .iter()
                .any(|car| !car.in_use || !car.flagged_for_removal);
            let removed = registry.remove_model(&name);
            println!("{} cars removed", removed.len());
            for data in &removed {
                println!("{}", fmt_car(&data.car));
            }
            exit_codes::OK
        }
        Command::ShowModel { name } => match registry.model(&name) {
            Some(model) => {
                println!("{}", fmt_model(model));
                exit_codes::OK
            }
            None => not_found(),
        },
        Command::ShowCar { reg_number } => match registry.car(&reg_number) {
            Some(car) => {
                println!("{}", fmt_car(car));
                exit_codes::OK
            }
            None => not_found(),
        },
        Command::ShowDriver { license_id } => match registry.driver(license_id) {
            Some(driver) => {
                println!("{}", fmt_driver(driver));
                exit_codes::OK
            }
            None => not_found(),
        },
        Command::CarsByModel { name } => {
            for car in registry.cars_by_model(&name) {
                println!("{}", fmt_car(car));
            }
            exit_codes::OK
        }
        Command::CarsByDriver { license_id } => {
            for car in registry.cars_by_driver(license_id) {
                println!("{}", fmt_car(car));
            }
            exit_codes::OK
        }
        Command::DriversByCar { reg_number } => {
            for driver in registry.drivers_by_car(&reg_number) {
                println!("{}", fmt_driver(driver));
            }
            exit_codes::OK
        }
        Command::Records { from, to } => {
            for record in registry.rent_records_at(from, to) {
                println!("{}", fmt_record(record));
            }
            exit_codes::OK
        }
    };

    if mutated {
        store::save(&registry, &cli.store)?;
    }
    Ok(code)
}

fn rejection_code(ok: bool) -> i32 {
    if ok { exit_codes::OK } else { exit_codes::REJECTED }
}

fn not_found() -> i32 {
    println!("not found");
    exit_codes::REJECTED
}

fn fmt_model(model: &Model) -> String {
    format!(
        "{} {}L {} {} {}/day",
        model.name, model.tank_capacity, model.manufacturer, model.country, model.price_per_day
    )
}

fn fmt_car(car: &Car) -> String {
    let mut line = format!(
        "{} {} {} {:?}",
        car.reg_number, car.color, car.model_name, car.state
    );
    if car.in_use {
        line.push_str(" in-use");
    }
    if car.flagged_for_removal {
        line.push_str(" flagged");
    }
    line
}

fn fmt_driver(driver: &Driver) -> String {
    format!(
        "{} {} {} {}",
        driver.license_id, driver.name, driver.birth_year, driver.phone
    )
}

fn fmt_record(record: &RentRecord) -> String {
    let mut line = format!(
        "{} {} {} {}d",
        record.reg_number, record.license_id, record.rent_date, record.rent_days
    );
    match record.return_date {
        Some(returned) => line.push_str(&format!(
            " returned {} damage {}% tank {}% cost {}",
            returned, record.damage_percent, record.tank_percent, record.cost
        )),
        None => line.push_str(" open"),
    }
    line
}
