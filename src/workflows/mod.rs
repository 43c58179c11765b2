pub mod admission;
pub mod catalog;
pub mod enrollment;
