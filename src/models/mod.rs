pub mod coordinates;
pub mod error;
pub mod location_record;
