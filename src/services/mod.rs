pub mod classifier;
pub mod recommendations;
