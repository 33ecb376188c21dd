pub mod config;
pub mod deadline;
pub mod paths;
pub mod state;
