use rust_decimal::Decimal;
use tracing::instrument;

use crate::{
    api::response::Response,
    model::{
        apperror::{ApplicationError, ErrorType},
        vehicles::{Vehicle, VehicleKey},
    },
    service::vehicles::VehicleService,
};

/**
 * Controller for the vehicle rental application.
 */
pub struct VehicleController {
    vehicle_service: VehicleService,
}

impl VehicleController {
    pub fn new(vehicle_service: VehicleService) -> Self {
        VehicleController { vehicle_service }
    }

    /**
     * Loads vehicles from a data file.
     *
     * # Arguments
     * `file_path`: Path to the vehicle data file.
     *
     * # Returns
     * A `Response` with a summary of how many vehicles were loaded.
     */
    #[instrument(skip(self), fields(service = "loadVehicles"))]
    pub fn load_vehicles_from_file(&mut self, file_path: &str) -> Response<String> {
        let file_path = file_path.trim();
        if file_path.is_empty() {
            return Response::error("Input filepath is invalid.");
        }
        Response::from(self.vehicle_service.load_vehicles(file_path).map(|count| format!("{count} vehicles loaded from {file_path}")))
    }

    /**
     * Adds a car to the fleet.
     *
     * # Returns
     * A `Response` carrying the added car.
     */
    #[instrument(skip(self), fields(service = "addCar"))]
    pub fn add_car(&mut self, brand: &str, model: &str, rental_price_per_day: Decimal, doors: u8, automatic: bool) -> Response<Vehicle> {
        self.add_vehicle(Vehicle::car(brand.trim().to_string(), model.trim().to_string(), rental_price_per_day, doors, automatic))
    }

    /**
     * Adds a bike to the fleet.
     *
     * # Returns
     * A `Response` carrying the added bike.
     */
    #[instrument(skip(self), fields(service = "addBike"))]
    pub fn add_bike(&mut self, brand: &str, model: &str, rental_price_per_day: Decimal, has_gear: bool, engine_capacity: u32) -> Response<Vehicle> {
        self.add_vehicle(Vehicle::bike(brand.trim().to_string(), model.trim().to_string(), rental_price_per_day, has_gear, engine_capacity))
    }

    fn add_vehicle(&mut self, vehicle: Vehicle) -> Response<Vehicle> {
        let key = vehicle.key();
        Response::from(self.vehicle_service.add_vehicle(vehicle).map_err(|err| ApplicationError::new(err.error_type, format!("Cannot add {key}: {}", err.message))))
    }

    #[instrument(skip(self), fields(service = "getAllVehicles"))]
    pub fn get_all_vehicles(&self) -> Response<Vec<Vehicle>> {
        Response::from(self.vehicle_service.get_all_vehicles())
    }

    #[instrument(skip(self), fields(service = "getAvailableVehicles"))]
    pub fn get_available_vehicles(&self) -> Response<Vec<Vehicle>> {
        Response::from(self.vehicle_service.get_available_vehicles())
    }

    /**
     * Searches for an available vehicle. At least one search term must be given.
     *
     * # Arguments
     * `brand`: Brand search term.
     * `model`: Model search term.
     *
     * # Returns
     * A `Response` carrying the first matching available vehicle.
     */
    #[instrument(skip(self), fields(service = "searchVehicle"))]
    pub fn search_vehicle(&self, brand: &str, model: &str) -> Response<Vehicle> {
        if brand.trim().is_empty() && model.trim().is_empty() {
            return Response::error("Invalid Brand or Model");
        }
        Response::from(self.vehicle_service.search_vehicle(brand, model))
    }

    /**
     * Rents the vehicle identified by `key`.
     */
    #[instrument(skip(self, key), fields(service = "rentVehicle", vehicle = %key))]
    pub fn rent_vehicle(&mut self, key: &VehicleKey) -> Response<Vehicle> {
        Response::from(Self::checked_key(key).and_then(|key| self.vehicle_service.rent_vehicle(key)))
    }

    /**
     * Returns the vehicle identified by `key`.
     */
    #[instrument(skip(self, key), fields(service = "returnVehicle", vehicle = %key))]
    pub fn return_vehicle(&mut self, key: &VehicleKey) -> Response<Vehicle> {
        Response::from(Self::checked_key(key).and_then(|key| self.vehicle_service.return_vehicle(key)))
    }

    fn checked_key(key: &VehicleKey) -> Result<&VehicleKey, ApplicationError> {
        if key.is_empty() {
            return Err(ApplicationError::new(ErrorType::Validation, "Invalid vehicle given"));
        }
        Ok(key)
    }
}
