pub mod context;
pub mod curve_sale;
pub mod distribution;
pub mod error;
