use tracing::instrument;

use crate::{
    dao::vehicles::VehicleDao,
    model::{
        apperror::{ApplicationError, ErrorType},
        vehicles::{Vehicle, VehicleKey},
    },
};

/**
 * Represents the service for renting vehicles. Owns the in-memory fleet.
 */
pub struct VehicleService {
    /**
     * The DAO for the vehicle data file.
     */
    vehicle_dao: VehicleDao,
    /**
     * All known vehicles in insertion order.
     */
    vehicles: Vec<Vehicle>,
}

impl VehicleService {
    /**
     * Creates a new instance of `VehicleService` with an empty fleet.
     *
     * # Arguments
     * `vehicle_dao`: The DAO for the vehicle data file.
     */
    pub fn new(vehicle_dao: VehicleDao) -> Self {
        VehicleService { vehicle_dao, vehicles: vec![] }
    }

    /**
     * Loads vehicles from a data file into the fleet. Vehicles already in the fleet are skipped.
     *
     * # Arguments
     * `file_path`: Path to the vehicle data file.
     *
     * # Returns
     * A Result containing the number of vehicles added or an `ApplicationError`.
     */
    #[instrument(skip(self))]
    pub fn load_vehicles(&mut self, file_path: &str) -> Result<usize, ApplicationError> {
        let loaded = self.vehicle_dao.load_vehicles_from_file(file_path)?;
        let mut added = 0;
        for vehicle in loaded {
            if self.vehicles.contains(&vehicle) {
                tracing::warn!("Duplicate vehicle {} in {}, skipping", vehicle.key(), file_path);
                continue;
            }
            self.vehicles.push(vehicle);
            added += 1;
        }
        tracing::info!("Loaded {} vehicles from {}", added, file_path);
        Ok(added)
    }

    /**
     * Adds a vehicle to the fleet.
     *
     * # Arguments
     * `vehicle`: The vehicle to add.
     *
     * # Returns
     * A Result containing the added vehicle or an `ApplicationError` if it is invalid or already exists.
     */
    #[instrument(skip(self, vehicle), fields(vehicle = %vehicle.key()))]
    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> Result<Vehicle, ApplicationError> {
        let vehicle = vehicle.validate()?;
        if self.vehicles.contains(&vehicle) {
            return Err(ApplicationError::new(ErrorType::ConstraintViolation, format!("{} already exists", vehicle.key())));
        }
        self.vehicles.push(vehicle.clone());
        Ok(vehicle)
    }

    /**
     * Returns every vehicle in the fleet.
     *
     * # Returns
     * A Result containing the vehicles or a not-found error when the fleet is empty.
     */
    pub fn get_all_vehicles(&self) -> Result<Vec<Vehicle>, ApplicationError> {
        if self.vehicles.is_empty() {
            return Err(ApplicationError::new(ErrorType::NotFound, "No vehicles loaded"));
        }
        Ok(self.vehicles.clone())
    }

    /**
     * Returns the vehicles that can be rented.
     *
     * # Returns
     * A Result containing the available vehicles or a not-found error when none is available.
     */
    pub fn get_available_vehicles(&self) -> Result<Vec<Vehicle>, ApplicationError> {
        let available: Vec<Vehicle> = self.vehicles.iter().filter(|vehicle| vehicle.available).cloned().collect();
        if available.is_empty() {
            return Err(ApplicationError::new(ErrorType::NotFound, "No vehicles available"));
        }
        Ok(available)
    }

    /**
     * Finds the first available vehicle whose brand and model contain the given terms, ignoring case.
     *
     * # Arguments
     * `brand`: Brand search term.
     * `model`: Model search term.
     *
     * # Returns
     * A Result containing the vehicle or a not-found error.
     */
    #[instrument(skip(self))]
    pub fn search_vehicle(&self, brand: &str, model: &str) -> Result<Vehicle, ApplicationError> {
        let brand_term = brand.trim().to_lowercase();
        let model_term = model.trim().to_lowercase();
        self.vehicles
            .iter()
            .find(|vehicle| vehicle.available && vehicle.matches(&brand_term, &model_term))
            .cloned()
            .ok_or_else(|| ApplicationError::new(ErrorType::NotFound, format!("No available vehicle found for {} {}", brand.trim(), model.trim())))
    }

    /**
     * Rents a vehicle. Fails without changing anything if the vehicle is already rented.
     *
     * # Arguments
     * `key`: Brand and model of the vehicle.
     *
     * # Returns
     * A Result containing the rented vehicle or an `ApplicationError`.
     */
    #[instrument(skip(self, key), fields(vehicle = %key))]
    pub fn rent_vehicle(&mut self, key: &VehicleKey) -> Result<Vehicle, ApplicationError> {
        let vehicle = self.find_vehicle_mut(key)?;
        if !vehicle.available {
            return Err(ApplicationError::new(ErrorType::InvalidState, "Vehicle is already rented."));
        }
        vehicle.available = false;
        tracing::info!("Vehicle rented: {}", key);
        Ok(vehicle.clone())
    }

    /**
     * Returns a rented vehicle. Fails without changing anything if the vehicle was not rented.
     *
     * # Arguments
     * `key`: Brand and model of the vehicle.
     *
     * # Returns
     * A Result containing the returned vehicle or an `ApplicationError`.
     */
    #[instrument(skip(self, key), fields(vehicle = %key))]
    pub fn return_vehicle(&mut self, key: &VehicleKey) -> Result<Vehicle, ApplicationError> {
        let vehicle = self.find_vehicle_mut(key)?;
        if vehicle.available {
            return Err(ApplicationError::new(ErrorType::InvalidState, "Vehicle was not rented."));
        }
        vehicle.available = true;
        tracing::info!("Vehicle returned: {}", key);
        Ok(vehicle.clone())
    }

    fn find_vehicle_mut(&mut self, key: &VehicleKey) -> Result<&mut Vehicle, ApplicationError> {
        self.vehicles
            .iter_mut()
            .find(|vehicle| vehicle.brand == key.brand && vehicle.model == key.model)
            .ok_or_else(|| ApplicationError::new(ErrorType::NotFound, format!("Vehicle {key} not found")))
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use rust_decimal::Decimal;

    use super::*;

    fn service_with_fleet() -> VehicleService {
        let mut service = VehicleService::new(VehicleDao::new());
        service.add_vehicle(Vehicle::car("Toyota".to_string(), "Corolla".to_string(), Decimal::new(50, 0), 4, false)).unwrap();
        service.add_vehicle(Vehicle::bike("Yamaha".to_string(), "R15".to_string(), Decimal::new(30, 0), true, 155)).unwrap();
        service
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let mut service = service_with_fleet();
        let error = service.add_vehicle(Vehicle::car("Toyota".to_string(), "Corolla".to_string(), Decimal::new(70, 0), 2, true)).unwrap_err();
        assert_eq!(error.error_type, ErrorType::ConstraintViolation);
        assert_eq!(error.message, "Toyota Corolla already exists");
        assert_eq!(service.get_all_vehicles().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_fleet() {
        let service = VehicleService::new(VehicleDao::new());
        assert_eq!(service.get_all_vehicles().unwrap_err().error_type, ErrorType::NotFound);
        assert_eq!(service.get_available_vehicles().unwrap_err().message, "No vehicles available");
    }

    #[test]
    fn test_rent_then_return() {
        let mut service = service_with_fleet();
        let key = VehicleKey::new("Toyota", "Corolla");
        let rented = service.rent_vehicle(&key).unwrap();
        assert!(!rented.available);
        assert_eq!(service.get_available_vehicles().unwrap().len(), 1);
        let returned = service.return_vehicle(&key).unwrap();
        assert!(returned.available);
        assert_eq!(service.get_available_vehicles().unwrap().len(), 2);
    }

    #[test]
    fn test_rent_rented_vehicle_fails_without_mutation() {
        let mut service = service_with_fleet();
        let key = VehicleKey::new("Yamaha", "R15");
        service.rent_vehicle(&key).unwrap();
        let before = service.get_all_vehicles().unwrap();
        let error = service.rent_vehicle(&key).unwrap_err();
        assert_eq!(error.error_type, ErrorType::InvalidState);
        assert_eq!(error.message, "Vehicle is already rented.");
        let after = service.get_all_vehicles().unwrap();
        let availability = |vehicles: &[Vehicle]| vehicles.iter().map(|v| v.available).collect::<Vec<bool>>();
        assert_eq!(availability(&before), availability(&after));
    }

    #[test]
    fn test_return_available_vehicle_fails_without_mutation() {
        let mut service = service_with_fleet();
        let error = service.return_vehicle(&VehicleKey::new("Toyota", "Corolla")).unwrap_err();
        assert_eq!(error.message, "Vehicle was not rented.");
        assert!(service.get_all_vehicles().unwrap().iter().all(|v| v.available));
    }

    #[test]
    fn test_rent_unknown_vehicle() {
        let mut service = service_with_fleet();
        let error = service.rent_vehicle(&VehicleKey::new("Honda", "Civic")).unwrap_err();
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.message, "Vehicle Honda Civic not found");
    }

    #[test]
    fn test_search_is_case_insensitive_and_skips_rented() {
        let mut service = service_with_fleet();
        assert_eq!(service.search_vehicle("toyo", "COROLLA").unwrap().key(), VehicleKey::new("Toyota", "Corolla"));
        service.rent_vehicle(&VehicleKey::new("Toyota", "Corolla")).unwrap();
        let error = service.search_vehicle("toyota", "corolla").unwrap_err();
        assert_eq!(error.error_type, ErrorType::NotFound);
    }

    #[test]
    fn test_load_vehicles_skips_duplicates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Car,Toyota,Corolla,50,4,false").unwrap();
        writeln!(file, "Car,Honda,Civic,60,4,true").unwrap();
        writeln!(file, "Bike,Honda,Civic,20,false,100").unwrap();
        let mut service = service_with_fleet();
        let added = service.load_vehicles(file.path().to_str().unwrap()).unwrap();
        assert_eq!(added, 1);
        assert_eq!(service.get_all_vehicles().unwrap().len(), 3);
    }

    #[test]
    fn test_load_vehicles_failure_keeps_fleet() {
        let mut service = service_with_fleet();
        assert!(service.load_vehicles("/nonexistent/vehicles.txt").is_err());
        assert_eq!(service.get_all_vehicles().unwrap().len(), 2);
    }
}
