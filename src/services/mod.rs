//! Servicios del sistema
//!
//! Piezas de lógica reutilizadas por los controllers.

pub mod identity;
pub mod pricing;
pub mod stop_membership;

pub use identity::{FixedIdentity, HeaderIdentity, IdentityResolver};
pub use pricing::{cents_to_decimal, snapshot_price};
pub use stop_membership::validate_membership;
