use std::io::{BufRead, Write};

use rust_decimal::Decimal;

use crate::{
    api::vehicles::VehicleController,
    model::{
        apperror::ApplicationError,
        vehicles::{Vehicle, VehicleKey},
    },
    ui::console::Console,
};

const MENU: &str = "\n--- Vehicle Rental Menu ---
1. View all vehicles
2. View available vehicles
3. Add car
4. Add bike
5. Search and rent a vehicle
6. Return a vehicle
7. Exit";

/**
 * Runs the vehicle rental menu until the user exits.
 *
 * # Arguments
 * `console`: The console to interact with.
 * `controller`: The vehicle controller.
 * `data_file`: Vehicle data file to load before the menu is shown.
 */
pub fn run<R: BufRead, W: Write>(console: &mut Console<R, W>, controller: &mut VehicleController, data_file: Option<&str>) -> Result<(), ApplicationError> {
    if let Some(data_file) = data_file {
        console.show(&controller.load_vehicles_from_file(data_file), String::clone)?;
    }
    loop {
        console.write_line(MENU)?;
        match console.prompt("Choose an option: ")?.as_str() {
            "1" => {
                console.show(&controller.get_all_vehicles(), |vehicles| render_vehicles(vehicles))?;
            }
            "2" => {
                console.show(&controller.get_available_vehicles(), |vehicles| render_vehicles(vehicles))?;
            }
            "3" => {
                let (brand, model, price) = read_common(console)?;
                let doors: u8 = console.read_value("Number of doors: ")?;
                let automatic = console.read_flag("Automatic (yes/no): ")?;
                console.show(&controller.add_car(&brand, &model, price, doors, automatic), |vehicle| format!("Added {}", vehicle.key()))?;
            }
            "4" => {
                let (brand, model, price) = read_common(console)?;
                let has_gear = console.read_flag("Has gear (yes/no): ")?;
                let engine_capacity: u32 = console.read_value("Engine capacity (cc): ")?;
                console.show(&controller.add_bike(&brand, &model, price, has_gear, engine_capacity), |vehicle| format!("Added {}", vehicle.key()))?;
            }
            "5" => search_and_rent(console, controller)?,
            "6" => {
                let brand = console.prompt("Brand: ")?;
                let model = console.prompt("Model: ")?;
                let response = controller.return_vehicle(&VehicleKey::new(brand, model));
                console.show(&response, |vehicle| format!("Vehicle returned: {}", vehicle.key()))?;
            }
            "7" => return Ok(()),
            _ => console.write_line("Invalid choice.")?,
        }
    }
}

fn read_common<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<(String, String, Decimal), ApplicationError> {
    let brand = console.prompt("Brand: ")?;
    let model = console.prompt("Model: ")?;
    let price: Decimal = console.read_value("Rental price per day: ")?;
    Ok((brand, model, price))
}

fn search_and_rent<R: BufRead, W: Write>(console: &mut Console<R, W>, controller: &mut VehicleController) -> Result<(), ApplicationError> {
    let brand = console.prompt("Brand to search: ")?;
    let model = console.prompt("Model to search: ")?;
    let response = controller.search_vehicle(&brand, &model);
    if !console.show(&response, |vehicle| render_vehicles(std::slice::from_ref(vehicle)))? {
        return Ok(());
    }
    let vehicle = response.into_result()?;
    if console.read_flag("Rent this vehicle (yes/no): ")? {
        console.show(&controller.rent_vehicle(&vehicle.key()), |vehicle| format!("Vehicle rented: {}", vehicle.key()))?;
    }
    Ok(())
}

fn render_vehicles(vehicles: &[Vehicle]) -> String {
    let mut table = format!("{:<10} {:<10} {:<11} {:<10} {:<12}", "Brand", "Model", "Price/Day", "Doors/CC", "Gear");
    for vehicle in vehicles {
        table.push('\n');
        table.push_str(&vehicle.to_string());
    }
    table
}
