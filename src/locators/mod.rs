pub mod aubergine;
pub mod dnd;
pub mod locator;
pub mod tockify;
pub mod upload;
