pub mod driver;
pub mod service;
pub mod session;
pub mod webdriver;
