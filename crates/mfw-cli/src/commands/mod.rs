pub mod generate;
pub mod paths;
