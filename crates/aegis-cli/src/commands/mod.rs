pub mod analyze;
pub mod info;
pub mod train;
