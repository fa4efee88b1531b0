pub mod context;
pub mod runner;
pub mod scenario_model;
pub mod scenarios;
