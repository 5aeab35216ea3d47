//! # Módulo Server
//! src/server/mod.rs
//!
//! Lógica del servidor TCP: acceptor, pool de workers y manejo de cada
//! conexión de principio a fin.

pub mod pool;
pub mod tcp;

pub use pool::{ConnectionQueue, WorkerPool};
pub use tcp::Server;
