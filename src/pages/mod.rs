pub mod aubergine_page;
pub mod calendar;
pub mod cookie;
pub mod drag_and_drop_page;
pub mod tockify_page;
pub mod upload_page;
