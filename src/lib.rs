pub mod analyzers;
pub mod catalog;
pub mod cost;
pub mod emissions;
pub mod fetch;
pub mod options;
pub mod parser;
pub mod route;
pub mod store;
pub mod tables;
pub mod trips;
