pub mod browser;
pub mod cli;
pub mod error;
pub mod facade;
pub mod locators;
pub mod pages;
pub mod report;
pub mod scenario;
pub mod trace;
