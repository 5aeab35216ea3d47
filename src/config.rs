//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor HTTP con soporte para
//! argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./http11_server --port 4221 --directory /tmp/files --workers 10
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=4221 FILES_DIR=/tmp/files ./http11_server
//! ```
//!
//! El directorio servido es opcional: sin `--directory`, las rutas
//! `/files/...` quedan no-funcionales (GET responde 404, POST cierra la
//! conexión).

use clap::Parser;

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "http11_server")]
#[command(about = "Servidor HTTP/1.1 minimalista implementado desde cero")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "4221", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio raíz para las rutas /files/... (opcional)
    #[arg(long, env = "FILES_DIR")]
    pub directory: Option<String>,

    /// Número de workers del pool de conexiones
    #[arg(long, default_value = "10", env = "HTTP_WORKERS")]
    pub workers: usize,

    /// Capacidad máxima de la cola de conexiones aceptadas
    #[arg(long = "queue-capacity", default_value = "64", env = "HTTP_QUEUE")]
    pub queue_capacity: usize,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use http11_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:4221");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("Workers must be >= 1".to_string());
        }
        if self.queue_capacity == 0 {
            return Err("Queue capacity must be >= 1".to_string());
        }
        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("⚙️  Configuración:");
        println!("   Address:     {}", self.address());
        match &self.directory {
            Some(dir) => println!("   Directory:   {}", dir),
            None => println!("   Directory:   (sin configurar, /files deshabilitado)"),
        }
        println!("   Workers:     {}", self.workers);
        println!("   Queue cap:   {}", self.queue_capacity);
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 4221,
            host: "127.0.0.1".to_string(),
            directory: None,
            workers: 10,
            queue_capacity: 64,
        }
    }
}
