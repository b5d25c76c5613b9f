// Application layer - use cases and provider seams
pub mod history_service;
pub mod normalizer;
pub mod price_provider;
