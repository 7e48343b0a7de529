pub mod image;
pub mod logger;
