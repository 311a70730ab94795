pub mod calendar_service;
pub mod hierarchy;
pub mod layout_service;
pub mod normalizer;
pub mod time_axis;
pub mod weather_service;
pub mod window;
