// Engine library root: loading, normalizing and answering questions over 10-K summary data.

pub mod config;
pub mod data;
pub mod error;
pub mod queries;
pub mod services;
