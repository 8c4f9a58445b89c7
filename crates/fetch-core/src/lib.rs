pub mod config;
pub mod git;
pub mod model;
pub mod paths;
pub mod run;
pub mod status;
pub mod sync;
