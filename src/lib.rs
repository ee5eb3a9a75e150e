//! Ask the GeoNames place search for populated places of one country and
//! print their names to the console.

pub mod api;
pub mod app;
pub mod cli;
pub mod prompt;
pub mod render;
