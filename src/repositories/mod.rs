pub mod booking_store;
pub mod memory_booking_repository;
pub mod pg_booking_repository;

pub use booking_store::{BookingStore, BookingUnit};
pub use memory_booking_repository::MemoryBookingRepository;
pub use pg_booking_repository::PgBookingRepository;
