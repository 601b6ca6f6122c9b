//! Core library exports for the Golden Section services marketplace.
//!
//! This crate exposes the domain model, Diesel persistence layer, intake
//! forms, service layer and HTTP routes used by the marketplace web
//! application.

pub mod config;
pub mod db;
pub mod domain;
pub mod dto;
mod error_conversions;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;
pub mod whatsapp;
