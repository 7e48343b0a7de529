pub mod analysis_service;
pub mod catalog;
pub mod confidence;
pub mod diagnosis_synthesizer;
pub mod history_service;
pub mod inference;
pub mod preferences_service;
pub mod session_service;
