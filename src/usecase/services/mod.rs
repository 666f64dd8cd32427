pub mod mutation_service;
pub mod projector;
pub mod view_model;
