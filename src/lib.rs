pub mod config;
pub mod error;
pub mod football_data;
pub mod form;
pub mod gateway;
pub mod http_client;
pub mod json_extract;
pub mod model;
pub mod oracle;
pub mod predictor;
pub mod service;
