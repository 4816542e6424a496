use std::fmt;
use std::hash::{Hash, Hasher};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::{
    apperror::{ApplicationError, ErrorType},
    money::round_money,
};

/**
 * Natural key of a vehicle. Two vehicles with the same brand and model are the same vehicle.
 */
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VehicleKey {
    pub brand: String,
    pub model: String,
}

impl VehicleKey {
    pub fn new(brand: impl Into<String>, model: impl Into<String>) -> Self {
        VehicleKey { brand: brand.into(), model: model.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.brand.trim().is_empty() || self.model.trim().is_empty()
    }
}

impl fmt::Display for VehicleKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.brand, self.model)
    }
}

/**
 * Variant specific vehicle details.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum VehicleKind {
    Car { doors: u8, automatic: bool },
    Bike { has_gear: bool, engine_capacity: u32 },
}

/**
 * A rentable vehicle. Equality and hashing only consider brand and model.
 */
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub brand: String,
    pub model: String,
    pub rental_price_per_day: Decimal,
    pub available: bool,
    #[serde(flatten)]
    pub kind: VehicleKind,
}

impl Vehicle {
    /**
     * Creates a new car. New vehicles are always available.
     */
    pub fn car(brand: String, model: String, rental_price_per_day: Decimal, doors: u8, automatic: bool) -> Self {
        Vehicle { brand, model, rental_price_per_day, available: true, kind: VehicleKind::Car { doors, automatic } }
    }

    /**
     * Creates a new bike. New vehicles are always available.
     */
    pub fn bike(brand: String, model: String, rental_price_per_day: Decimal, has_gear: bool, engine_capacity: u32) -> Self {
        Vehicle { brand, model, rental_price_per_day, available: true, kind: VehicleKind::Bike { has_gear, engine_capacity } }
    }

    pub fn key(&self) -> VehicleKey {
        VehicleKey::new(self.brand.clone(), self.model.clone())
    }

    /**
     * Case-insensitive substring match on brand and model. Terms must already be lowercase.
     */
    pub fn matches(&self, brand_term: &str, model_term: &str) -> bool {
        self.brand.to_lowercase().contains(brand_term) && self.model.to_lowercase().contains(model_term)
    }

    /**
     * Validates a vehicle before it is added to the fleet.
     *
     * # Returns
     * The vehicle itself or a validation error.
     */
    pub fn validate(self) -> Result<Self, ApplicationError> {
        if self.key().is_empty() {
            return Err(ApplicationError::new(ErrorType::Validation, "Brand and model cannot be empty"));
        }
        if self.rental_price_per_day <= Decimal::ZERO {
            return Err(ApplicationError::new(ErrorType::Validation, "Rental price per day must be greater than 0"));
        }
        Ok(self)
    }
}

impl PartialEq for Vehicle {
    fn eq(&self, other: &Self) -> bool {
        self.brand == other.brand && self.model == other.model
    }
}

impl Eq for Vehicle {}

impl Hash for Vehicle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.brand.hash(state);
        self.model.hash(state);
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let price = format!("{:.2}", round_money(self.rental_price_per_day));
        write!(f, "{:<10} {:<10} {:<11}", self.brand, self.model, price)?;
        match &self.kind {
            VehicleKind::Car { doors, automatic } => write!(f, " {doors} {:<10} {:<12}", "Doors", if *automatic { "Automatic" } else { "Manual" }),
            VehicleKind::Bike { has_gear, engine_capacity } => write!(f, " {engine_capacity} {:<8} {:<12}", "cc", if *has_gear { "Gear" } else { "No Gear" }),
        }
    }
}
