pub mod engine;
pub mod entity;
pub mod repository;
