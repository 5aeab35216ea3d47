//! # Módulo de Métricas
//! src/metrics/mod.rs
//!
//! Observabilidad mínima del servidor: contadores de requests y conexiones.

pub mod collector;

pub use collector::MetricsCollector;
