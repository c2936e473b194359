pub mod airports;
pub mod config;
pub mod display;
pub mod errors;
pub mod geo;
pub mod render;
pub mod server;
pub mod status;
pub mod telemetry;

pub use airports::AirportTable;
pub use display::{DisplayState, FlightRecord, derive};
pub use errors::{PanelError, Result};
pub use status::{StatusCategory, classify};
