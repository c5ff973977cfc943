pub mod assets;
pub mod dto;
pub mod error;
pub mod format;
pub mod handlers;
pub mod routes;
pub mod views;

pub use error::FormError;
pub use routes::register_routes;
