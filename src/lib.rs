pub mod aerolog;
pub mod aerolog_errors;
pub mod constants;
pub mod elevation;
pub mod flight;
pub mod flight_store;
pub mod geodesy;
pub mod scoring;
pub mod scoring_rules;
pub mod time;
pub mod track;
