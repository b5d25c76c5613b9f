// Infrastructure layer - External dependencies and adapters
pub mod coingecko;
pub mod coinpaprika;
pub mod config;
pub mod cryptocompare;
pub mod dto;
pub mod http_client;
pub mod http_response;
