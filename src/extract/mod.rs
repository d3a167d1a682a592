pub mod csv;
pub mod factory;
pub mod json;
