pub mod connection;
pub mod params;
pub(crate) mod utils;
