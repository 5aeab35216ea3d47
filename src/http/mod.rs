//! # Módulo HTTP
//! src/http/mod.rs
//!
//! Este módulo implementa el protocolo HTTP/1.1 desde cero, sin usar
//! librerías de alto nivel. Incluye:
//!
//! - Lectura de líneas sobre el stream de la conexión
//! - Parsing de requests HTTP/1.1
//! - Construcción de responses HTTP
//! - Manejo de status codes
//! - Codificación gzip del body (Content-Encoding)
//!
//! ## Alcance deliberadamente mínimo
//!
//! El servidor habla un subconjunto de HTTP/1.1:
//! - Una petición por conexión (sin keep-alive)
//! - Sin chunked transfer encoding
//! - Solo los headers User-Agent, Accept-Encoding y Content-Length
//! - Solo gzip como codificación
//!
//! ### Formato de Request
//!
//! ```text
//! GET /echo/abc HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 3\r\n
//! \r\n
//! abc
//! ```

pub mod encoding; // Negociación Accept-Encoding y compresión gzip
pub mod reader;   // Lector de líneas sobre el stream
pub mod request;  // Parsing de HTTP requests
pub mod response; // Construcción de HTTP responses
pub mod status;   // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use reader::LineReader;
pub use request::{ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
