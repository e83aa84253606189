pub mod route_controller;
pub mod trip_controller;

pub use route_controller::RouteController;
pub use trip_controller::TripController;
