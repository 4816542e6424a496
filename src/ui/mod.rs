pub mod console;
pub mod discounts;
pub mod products;
pub mod students;
pub mod users;
pub mod vehicles;
