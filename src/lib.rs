pub mod config;
pub mod model;
pub mod rag;
pub mod web;
