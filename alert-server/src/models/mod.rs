//! Request / response bodies

pub mod reading;

pub use reading::*;
