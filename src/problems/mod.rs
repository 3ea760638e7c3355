pub mod problem;
pub mod aids;
pub mod generator;
pub mod selector;
