pub mod concept;
pub mod model;
pub mod difficulty;
