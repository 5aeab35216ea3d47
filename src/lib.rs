//! # HTTP/1.1 Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 minimalista implementado desde cero, sin librerías
//! HTTP: se parsea el request directo del stream de bytes, se rutea contra
//! un conjunto fijo de paths y se sintetiza la respuesta a mano (con gzip
//! opcional en el body).
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: lector de líneas, parsing de requests, responses, status y gzip
//! - `router`: resolución (método, target) → ruta, con precedencia fija
//! - `handlers`: síntesis de la respuesta por ruta
//! - `storage`: acceso a archivos del directorio servido
//! - `server`: acceptor TCP, cola acotada y pool de workers
//! - `config`: CLI y variables de entorno
//! - `metrics`: contadores de observabilidad
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use http11_server::config::Config;
//! use http11_server::server::Server;
//!
//! let config = Config::default();
//! let server = Server::new(config);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod handlers;
pub mod http;
pub mod metrics;
pub mod router;
pub mod server;
pub mod storage;
