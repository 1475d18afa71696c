pub mod bootstrap;
pub mod catalog_service;
