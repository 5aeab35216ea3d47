//! # HTTP Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor HTTP/1.1.

use http11_server::config::Config;
use http11_server::server::Server;

fn main() {
    println!("=================================");
    println!("  HTTP/1.1 Server (from scratch)");
    println!("=================================\n");

    // Parsear configuración desde CLI / env
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("💥 Configuración inválida: {}", e);
        std::process::exit(1);
    }

    config.print_summary();

    // Crear el servidor
    let server = Server::new(config);

    // Iniciar el servidor (esto bloqueará el thread; el bind fallido es fatal)
    if let Err(e) = server.run() {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}
