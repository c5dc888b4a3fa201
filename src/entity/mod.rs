pub mod measures;
pub mod metrics;
pub mod sensors;
pub mod units;
