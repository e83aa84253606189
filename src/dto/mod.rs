pub mod route_dto;
pub mod trip_dto;

pub use route_dto::{RouteDetail, StopInfo};
pub use trip_dto::{CreateTripRequest, RouteInfo, TripDetail};
