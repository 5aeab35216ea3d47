//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del acceptor y del worker de conexión. El acceptor es un
//! loop single-thread que solo bloquea esperando la próxima conexión; cada
//! conexión aceptada se encola hacia el pool fijo de workers.
//!
//! Cada conexión atiende exactamente un par request/response y se cierra:
//!
//! ```text
//! AWAIT_REQUEST → PARSE → ROUTE → (FILE_IO) → BUILD_RESPONSE → WRITE → CLOSED
//! ```
//!
//! Cualquier fault en cualquier etapa pasa directo a CLOSED después de
//! loguear: se cierra esa conexión, nunca el proceso. El fallo del bind al
//! arrancar sí es fatal y se propaga al main.

use crate::config::Config;
use crate::handlers::{self, HandlerError};
use crate::http::{LineReader, ParseError, Request};
use crate::metrics::MetricsCollector;
use crate::router;
use crate::server::pool::{ConnectionQueue, WorkerPool};
use crate::storage::FileStore;
use std::io::Write;
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::time::Instant;

/// Faults que cierran una conexión sin respuesta (o a mitad de escritura)
#[derive(Debug)]
pub enum ConnectionError {
    /// Request malformado (request line o header inválido)
    Parse(ParseError),

    /// La etapa de respuesta no tiene respuesta definida
    Handler(HandlerError),

    /// Error de I/O escribiendo la respuesta
    Io(std::io::Error),
}

impl std::fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionError::Parse(e) => write!(f, "parse fault: {}", e),
            ConnectionError::Handler(e) => write!(f, "handler fault: {}", e),
            ConnectionError::Io(e) => write!(f, "write fault: {}", e),
        }
    }
}

impl std::error::Error for ConnectionError {}

impl From<ParseError> for ConnectionError {
    fn from(e: ParseError) -> Self {
        ConnectionError::Parse(e)
    }
}

impl From<HandlerError> for ConnectionError {
    fn from(e: HandlerError) -> Self {
        ConnectionError::Handler(e)
    }
}

impl From<std::io::Error> for ConnectionError {
    fn from(e: std::io::Error) -> Self {
        ConnectionError::Io(e)
    }
}

/// Servidor HTTP/1.1 concurrente
pub struct Server {
    config: Config,
    store: Option<Arc<FileStore>>,
    metrics: MetricsCollector,
}

impl Server {
    /// Crea el servidor a partir de la configuración
    ///
    /// El directorio servido (si se configuró) se fija acá una sola vez y
    /// después viaja como referencia de solo lectura a cada worker.
    pub fn new(config: Config) -> Self {
        let store = config
            .directory
            .as_ref()
            .map(|dir| Arc::new(FileStore::new(dir.clone())));

        Self {
            config,
            store,
            metrics: MetricsCollector::new(),
        }
    }

    /// Collector de métricas del servidor (compartido con los workers)
    pub fn metrics(&self) -> MetricsCollector {
        self.metrics.clone()
    }

    /// Hace bind del listener y corre el loop de accept
    ///
    /// Un fallo del bind se propaga: es fatal al arranque, sin reintentos.
    /// En operación normal esta función no retorna.
    pub fn run(&self) -> std::io::Result<()> {
        let address = self.config.address();
        let listener = TcpListener::bind(&address)?;
        println!("[+] Servidor escuchando en {}", address);
        self.serve(listener)
    }

    /// Corre el loop de accept sobre un listener ya bindeado
    ///
    /// Separado de `run()` para poder servir en un puerto efímero en tests.
    pub fn serve(&self, listener: TcpListener) -> std::io::Result<()> {
        let queue = Arc::new(ConnectionQueue::new(self.config.queue_capacity));

        println!(
            "[*] Pool de workers: {} threads, cola de {} conexiones",
            self.config.workers, self.config.queue_capacity
        );

        let store = self.store.clone();
        let metrics = self.metrics.clone();
        let _pool = WorkerPool::spawn(self.config.workers, Arc::clone(&queue), move |stream| {
            metrics.connection_started();
            if let Err(e) = handle_connection(stream, store.as_deref(), &metrics) {
                eprintln!("[!] Conexión cerrada por fault: {}", e);
                metrics.record_fault();
            }
            metrics.connection_finished();
        });

        // El acceptor solo bloquea esperando conexiones (o espacio en la
        // cola cuando el pool está saturado); nunca procesa requests.
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => queue.push(stream),
                Err(e) => eprintln!("[!] Error al aceptar conexión: {}", e),
            }
        }

        Ok(())
    }
}

/// Atiende una conexión completa: parse → route → respond → write → close
///
/// La conexión se cierra exactamente una vez (al soltar el stream), tanto
/// en éxito como en fault. Sin keep-alive: un request por conexión.
pub fn handle_connection(
    mut stream: TcpStream,
    store: Option<&FileStore>,
    metrics: &MetricsCollector,
) -> Result<(), ConnectionError> {
    let start = Instant::now();
    let peer = stream
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    // PARSE: el reader vive solo lo que dura el parseo; el body ya quedó
    // drenado dentro del Request
    let request = {
        let mut reader = LineReader::new(&stream);
        Request::read_from(&mut reader)?
    };

    // ROUTE
    let route = router::resolve(request.method(), request.target());

    // BUILD_RESPONSE (con FILE_IO adentro para las rutas /files)
    let response = handlers::respond(&request, route, store)?;

    // WRITE
    stream.write_all(&response.to_bytes())?;
    stream.flush()?;

    let latency = start.elapsed();
    metrics.record_request(response.status().as_u16(), latency);

    println!(
        "[+] {} \"{} {}\" -> {} ({:.2}ms)",
        peer,
        request.method(),
        request.target(),
        response.status(),
        latency.as_secs_f64() * 1000.0
    );

    Ok(())
}
