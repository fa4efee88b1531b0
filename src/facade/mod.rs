pub mod page;
pub mod wait;
