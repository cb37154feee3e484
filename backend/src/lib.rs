//! ML Fitness backend
//!
//! Nutrition and fitness tracking API: barcode lookups across public food
//! databases, a daily diary for food, water, exercise, weight and
//! supplements, goals, meal plans and a dashboard.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod metrics;
pub mod nutrition;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
