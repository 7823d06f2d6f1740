pub mod allure;
pub mod bruno;

pub use allure::*;
pub use bruno::*;
