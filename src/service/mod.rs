mod car_service;
mod list_query;


pub use car_service::CarService;
pub use list_query::{parse_id, ListPolicy, ListQuery};
