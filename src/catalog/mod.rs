mod data;
pub mod repo;
pub mod seed;
