pub mod config;
pub mod db;
pub mod error;
pub mod feed;
pub mod filter;
pub mod model;
pub mod pagination;
pub mod service;
pub mod tenancy;
pub mod transform;
