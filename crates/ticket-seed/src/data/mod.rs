pub mod calendar;
pub mod datasets;
pub mod generator;
