pub mod discounts;
pub mod products;
pub mod response;
pub mod students;
pub mod users;
pub mod vehicles;
