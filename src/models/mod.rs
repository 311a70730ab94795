pub mod calendar;
pub mod notion;
pub mod weather;
pub mod widget;
