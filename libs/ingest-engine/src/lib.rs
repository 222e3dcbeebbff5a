pub mod bootstrap;
pub mod config;
pub mod error;
pub mod facade;
pub mod handlers;
pub mod router;
pub mod routing;
pub mod store;
