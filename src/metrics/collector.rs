//! # Collector de Métricas
//! src/metrics/collector.rs
//!
//! Recolecta contadores del servidor en tiempo real: total de requests,
//! requests por código de estado, faults de conexión y conexiones activas.
//! No se expone por HTTP; se usa en los logs por request y en tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Collector de métricas thread-safe
#[derive(Clone)]
pub struct MetricsCollector {
    inner: Arc<Mutex<MetricsData>>,
}

/// Datos internos de métricas
struct MetricsData {
    /// Contador total de requests respondidos
    total_requests: u64,

    /// Requests por código de estado
    status_codes: HashMap<u16, u64>,

    /// Conexiones cerradas por fault (sin respuesta escrita)
    connection_faults: u64,

    /// Conexiones siendo atendidas en este momento
    active_connections: u64,

    /// Suma de latencias en microsegundos (para promedio)
    total_latency_us: u64,
}

/// Snapshot inmutable de las métricas para logs y tests
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub status_codes: HashMap<u16, u64>,
    pub connection_faults: u64,
    pub active_connections: u64,
    pub avg_latency_us: u64,
}

impl MetricsCollector {
    /// Crea un nuevo collector de métricas
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MetricsData {
                total_requests: 0,
                status_codes: HashMap::new(),
                connection_faults: 0,
                active_connections: 0,
                total_latency_us: 0,
            })),
        }
    }

    /// Registra un request respondido con su latencia
    pub fn record_request(&self, status_code: u16, latency: Duration) {
        let mut data = self.inner.lock().unwrap();
        data.total_requests += 1;
        *data.status_codes.entry(status_code).or_insert(0) += 1;
        data.total_latency_us += latency.as_micros() as u64;
    }

    /// Registra una conexión cerrada por fault, sin respuesta
    pub fn record_fault(&self) {
        let mut data = self.inner.lock().unwrap();
        data.connection_faults += 1;
    }

    /// Incrementa el contador de conexiones activas
    pub fn connection_started(&self) {
        let mut data = self.inner.lock().unwrap();
        data.active_connections += 1;
    }

    /// Decrementa el contador de conexiones activas
    pub fn connection_finished(&self) {
        let mut data = self.inner.lock().unwrap();
        if data.active_connections > 0 {
            data.active_connections -= 1;
        }
    }

    /// Obtiene un snapshot de las métricas actuales
    pub fn snapshot(&self) -> MetricsSnapshot {
        let data = self.inner.lock().unwrap();
        let avg_latency_us = if data.total_requests > 0 {
            data.total_latency_us / data.total_requests
        } else {
            0
        };

        MetricsSnapshot {
            total_requests: data.total_requests,
            status_codes: data.status_codes.clone(),
            connection_faults: data.connection_faults,
            active_connections: data.active_connections,
            avg_latency_us,
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}
