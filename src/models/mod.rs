pub mod analysis;
pub mod diagnosis;
pub mod disease;
pub mod preferences;
