pub mod auth_service;
pub mod portal_service;
