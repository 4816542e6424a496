use std::fmt::Display;
use std::fs::File;
use std::io::Read;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use tracing::instrument;

use crate::model::{
    apperror::{ApplicationError, ErrorType},
    vehicles::Vehicle,
};

/**
 * Number of comma separated fields in every vehicle record.
 */
const VEHICLE_RECORD_FIELDS: usize = 6;

/**
 * DAO for the vehicle data file.
 *
 * Records look like `Car,brand,model,price,doors,isAutomatic` or `Bike,brand,model,price,hasGear,engineCapacity`.
 */
pub struct VehicleDao {}

impl VehicleDao {
    /**
     * Creates a new instance of `VehicleDao`.
     *
     * # Returns
     * A new instance of `VehicleDao`.
     */
    pub fn new() -> Self {
        VehicleDao {}
    }

    /**
     * Loads all vehicles from a data file.
     *
     * # Arguments
     * `file_path`: Path to the vehicle data file.
     *
     * # Returns
     * A Result containing the parsed vehicles or an `ApplicationError` if the file can't be read or contains a malformed record.
     */
    #[instrument(skip(self))]
    pub fn load_vehicles_from_file(&self, file_path: &str) -> Result<Vec<Vehicle>, ApplicationError> {
        let file = File::open(file_path).map_err(|err| ApplicationError::new(ErrorType::FileAccess, format!("Failed to read vehicle file {file_path}: {err}")))?;
        let vehicles = self.load_vehicles(file)?;
        tracing::debug!("Parsed {} vehicles from {}", vehicles.len(), file_path);
        Ok(vehicles)
    }

    /**
     * Loads all vehicles from a reader. Unknown vehicle types are skipped.
     *
     * # Arguments
     * `reader`: Source of the vehicle records.
     *
     * # Returns
     * A Result containing the parsed vehicles or an `ApplicationError` on the first malformed record.
     */
    pub fn load_vehicles<R: Read>(&self, reader: R) -> Result<Vec<Vehicle>, ApplicationError> {
        let mut csv_reader = ReaderBuilder::new().has_headers(false).flexible(true).trim(Trim::All).from_reader(reader);
        let mut vehicles = vec![];
        for record in csv_reader.records() {
            let record = record.map_err(|err| ApplicationError::new(ErrorType::FileAccess, format!("Failed to read vehicle record: {err}")))?;
            let line = record.position().map_or(0, csv::Position::line);
            if let Some(vehicle) = Self::parse_vehicle(&record, line)? {
                vehicles.push(vehicle);
            }
        }
        Ok(vehicles)
    }

    /**
     * Parses one record into a vehicle.
     *
     * # Arguments
     * `record`: The trimmed record.
     * `line`: Line number of the record, used in error messages.
     *
     * # Returns
     * `None` for unknown vehicle types, the vehicle otherwise.
     */
    fn parse_vehicle(record: &StringRecord, line: u64) -> Result<Option<Vehicle>, ApplicationError> {
        let vehicle_type = record.get(0).unwrap_or_default();
        if vehicle_type != "Car" && vehicle_type != "Bike" {
            tracing::warn!("Unknown vehicle type {} on line {}, skipping", vehicle_type, line);
            return Ok(None);
        }
        if record.len() != VEHICLE_RECORD_FIELDS {
            return Err(ApplicationError::new(ErrorType::FileAccess, format!("Line {line}: expected {VEHICLE_RECORD_FIELDS} fields for {vehicle_type}, found {}", record.len())));
        }
        let brand = Self::text_field(record, 1, "brand", line)?;
        let model = Self::text_field(record, 2, "model", line)?;
        let price: Decimal = Self::parse_field(record, 3, "price", line)?;
        let vehicle = if vehicle_type == "Car" {
            Vehicle::car(brand, model, price, Self::parse_field(record, 4, "doors", line)?, Self::parse_flag(record, 5, "isAutomatic", line)?)
        } else {
            Vehicle::bike(brand, model, price, Self::parse_flag(record, 4, "hasGear", line)?, Self::parse_field(record, 5, "engineCapacity", line)?)
        };
        let vehicle = vehicle.validate().map_err(|err| ApplicationError::new(ErrorType::FileAccess, format!("Line {line}: {}", err.message)))?;
        Ok(Some(vehicle))
    }

    fn text_field(record: &StringRecord, index: usize, name: &str, line: u64) -> Result<String, ApplicationError> {
        match record.get(index) {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => Err(ApplicationError::new(ErrorType::FileAccess, format!("Line {line}: {name} is missing"))),
        }
    }

    fn parse_field<T>(record: &StringRecord, index: usize, name: &str, line: u64) -> Result<T, ApplicationError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let value = record.get(index).unwrap_or_default();
        value.parse::<T>().map_err(|err| ApplicationError::new(ErrorType::FileAccess, format!("Line {line}: invalid {name} '{value}': {err}")))
    }

    fn parse_flag(record: &StringRecord, index: usize, name: &str, line: u64) -> Result<bool, ApplicationError> {
        let value = record.get(index).unwrap_or_default();
        if value.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if value.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ApplicationError::new(ErrorType::FileAccess, format!("Line {line}: invalid {name} '{value}', expected true or false")))
        }
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;
    use crate::model::vehicles::VehicleKind;

    #[test]
    fn test_load_cars_and_bikes() {
        let data = "Car, Toyota, Corolla, 50.0, 4, false\nBike,Yamaha,R15,25.5,true,155\n";
        let vehicles = VehicleDao::new().load_vehicles(data.as_bytes()).unwrap();
        assert_eq!(vehicles.len(), 2);
        let car = vehicles.first().unwrap();
        assert_eq!(car.brand, "Toyota");
        assert_eq!(car.model, "Corolla");
        assert_eq!(car.rental_price_per_day, Decimal::new(50, 0));
        assert!(car.available);
        assert_eq!(car.kind, VehicleKind::Car { doors: 4, automatic: false });
        let bike = vehicles.get(1).unwrap();
        assert_eq!(bike.kind, VehicleKind::Bike { has_gear: true, engine_capacity: 155 });
        assert_eq!(bike.rental_price_per_day, Decimal::new(255, 1));
    }

    #[test]
    fn test_unknown_type_and_blank_lines_skipped() {
        let data = "Truck,Volvo,FH,300,2,true\n\nCar,Honda,Civic,60,4,TRUE\n";
        let vehicles = VehicleDao::new().load_vehicles(data.as_bytes()).unwrap();
        assert_eq!(vehicles.len(), 1);
        assert_eq!(vehicles.first().unwrap().kind, VehicleKind::Car { doors: 4, automatic: true });
    }

    #[test]
    fn test_malformed_record_reports_line() {
        let data = "Car,Honda,Civic,60,4,true\nBike,Yamaha,R15,abc,true,155\n";
        let error = VehicleDao::new().load_vehicles(data.as_bytes()).unwrap_err();
        assert_eq!(error.error_type, ErrorType::FileAccess);
        assert!(error.message.starts_with("Line 2: invalid price 'abc'"), "{}", error.message);
    }

    #[test]
    fn test_wrong_field_count() {
        let error = VehicleDao::new().load_vehicles("Car,Honda,Civic,60,4\n".as_bytes()).unwrap_err();
        assert_eq!(error.message, "Line 1: expected 6 fields for Car, found 5");
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let error = VehicleDao::new().load_vehicles("Car,Toyota,Corolla,-5,4,false\n".as_bytes()).unwrap_err();
        assert_eq!(error.error_type, ErrorType::FileAccess);
        assert_eq!(error.message, "Line 1: Rental price per day must be greater than 0");
        let error = VehicleDao::new().load_vehicles("Car,Honda,City,55,4,true\nBike,Yamaha,R15,0,true,155\n".as_bytes()).unwrap_err();
        assert_eq!(error.message, "Line 2: Rental price per day must be greater than 0");
    }

    #[test]
    fn test_invalid_flag() {
        let error = VehicleDao::new().load_vehicles("Bike,Yamaha,R15,30,yes,155\n".as_bytes()).unwrap_err();
        assert_eq!(error.message, "Line 1: invalid hasGear 'yes', expected true or false");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Car,Tesla,Model S,120,4,true").unwrap();
        let vehicles = VehicleDao::new().load_vehicles_from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(vehicles.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let error = VehicleDao::new().load_vehicles_from_file("/nonexistent/vehicles.txt").unwrap_err();
        assert_eq!(error.error_type, ErrorType::FileAccess);
        assert!(error.message.starts_with("Failed to read vehicle file /nonexistent/vehicles.txt"));
    }
}
