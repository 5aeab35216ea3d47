//! # Handlers por Ruta
//! src/handlers/mod.rs
//!
//! Este módulo sintetiza la respuesta para cada ruta resuelta por el
//! router. Tabla de síntesis:
//!
//! | Ruta          | Status | Headers                          | Body            |
//! |---------------|--------|----------------------------------|-----------------|
//! | Root          | 200    | ninguno                          | vacío           |
//! | Echo(p)       | 200    | text/plain (+gzip si se negoció) | p o gzip(p)     |
//! | UserAgent     | 200    | text/plain                      | valor del header |
//! | FileGet(n)    | 200/404| application/octet-stream         | bytes / vacío   |
//! | FileCreate(n) | 201    | ninguno                          | vacío           |
//! | NotFound      | 404    | ninguno                          | vacío           |
//!
//! Un `Err(HandlerError)` significa "no hay respuesta definida": el worker
//! loguea y cierra la conexión sin escribir bytes. Así se preserva el
//! comportamiento original ante un User-Agent ausente o un fallo de
//! creación de archivo.

use crate::http::encoding::{self, Encoded};
use crate::http::{Request, Response, StatusCode};
use crate::router::RouteMatch;
use crate::storage::{FileStore, StoreError};

/// Faults de la etapa de respuesta que cierran la conexión sin responder
#[derive(Debug)]
pub enum HandlerError {
    /// Ruta /user-agent sin header User-Agent en el request
    MissingUserAgent,

    /// Ruta /files con POST pero sin directorio servido configurado
    NoDirectory,

    /// La creación del archivo falló (ya existe o error de I/O)
    FileCreate(StoreError),

    /// Falló la compresión gzip del body
    Encoding(std::io::Error),
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandlerError::MissingUserAgent => {
                write!(f, "Missing User-Agent header on /user-agent route")
            }
            HandlerError::NoDirectory => {
                write!(f, "No served directory configured for /files route")
            }
            HandlerError::FileCreate(e) => write!(f, "File creation failed: {}", e),
            HandlerError::Encoding(e) => write!(f, "gzip encoding failed: {}", e),
        }
    }
}

impl std::error::Error for HandlerError {}

/// Sintetiza la respuesta para una ruta ya resuelta
///
/// `store` es el colaborador de filesystem; llega como `None` cuando el
/// servidor arrancó sin `--directory` (las rutas de archivos quedan
/// no-funcionales: GET responde 404 y POST cierra la conexión).
pub fn respond(
    request: &Request,
    route: RouteMatch,
    store: Option<&FileStore>,
) -> Result<Response, HandlerError> {
    match route {
        RouteMatch::Root => Ok(Response::new(StatusCode::Ok)),

        RouteMatch::Echo(param) => echo(request, &param),

        RouteMatch::UserAgent => user_agent(request),

        RouteMatch::FileGet(name) => Ok(file_get(store, &name)),

        RouteMatch::FileCreate(name) => file_create(request, store, &name),

        RouteMatch::NotFound => Ok(Response::new(StatusCode::NotFound)),
    }
}

/// Handler de /echo/{param}: devuelve el parámetro, gzip si se negoció
fn echo(request: &Request, param: &str) -> Result<Response, HandlerError> {
    let accept_encoding = request.header("Accept-Encoding");
    let response = Response::new(StatusCode::Ok).with_header("Content-Type", "text/plain");

    match encoding::encode(param.as_bytes(), accept_encoding).map_err(HandlerError::Encoding)? {
        Encoded::Gzip(compressed) => Ok(response
            .with_header("Content-Encoding", "gzip")
            .with_body_bytes(compressed)),
        Encoded::Identity => Ok(response.with_body_bytes(param.as_bytes().to_vec())),
    }
}

/// Handler de /user-agent: devuelve el valor del header User-Agent
///
/// Header ausente: fault de conexión (sin respuesta), preservando el
/// comportamiento del servidor original. Decisión documentada en DESIGN.md.
fn user_agent(request: &Request) -> Result<Response, HandlerError> {
    let value = request
        .header("User-Agent")
        .ok_or(HandlerError::MissingUserAgent)?;

    Ok(Response::new(StatusCode::Ok)
        .with_header("Content-Type", "text/plain")
        .with_body_bytes(value.as_bytes().to_vec()))
}

/// Handler de GET /files/{name}: contenido del archivo o 404
///
/// Sin directorio configurado el archivo "no existe": 404. Un error de
/// lectura sobre un archivo existente también degrada a 404 (se loguea).
fn file_get(store: Option<&FileStore>, name: &str) -> Response {
    let store = match store {
        Some(s) => s,
        None => return Response::new(StatusCode::NotFound),
    };

    if !store.exists(name) {
        return Response::new(StatusCode::NotFound);
    }

    match store.read_all(name) {
        Ok(bytes) => Response::new(StatusCode::Ok)
            .with_header("Content-Type", "application/octet-stream")
            .with_body_bytes(bytes),
        Err(e) => {
            eprintln!("[!] Error leyendo archivo {:?}: {}", name, e);
            Response::new(StatusCode::NotFound)
        }
    }
}

/// Handler de POST /files/{name}: crea el archivo con el body del request
///
/// Si la creación falla (ya existe, error de I/O, sin directorio) no hay
/// respuesta definida: el fault se propaga y el worker cierra la conexión.
fn file_create(
    request: &Request,
    store: Option<&FileStore>,
    name: &str,
) -> Result<Response, HandlerError> {
    let store = store.ok_or(HandlerError::NoDirectory)?;

    store
        .create_and_write(name, request.body())
        .map_err(HandlerError::FileCreate)?;

    Ok(Response::new(StatusCode::Created))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::LineReader;
    use crate::router::resolve;
    use std::fs;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_store() -> FileStore {
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "http11_handlers_test_{}_{}",
            std::process::id(),
            id
        ));
        fs::create_dir_all(&dir).expect("create temp dir");
        FileStore::new(dir)
    }

    fn request(raw: &[u8]) -> Request {
        let mut reader = LineReader::new(Cursor::new(raw.to_vec()));
        Request::read_from(&mut reader).expect("valid request")
    }

    /// Helper: parsea, rutea y responde en un paso
    fn handle(raw: &[u8], store: Option<&FileStore>) -> Result<Response, HandlerError> {
        let req = request(raw);
        let route = resolve(req.method(), req.target());
        respond(&req, route, store)
    }

    #[test]
    fn test_root_is_headerless_200() {
        let response = handle(b"GET / HTTP/1.1\r\n\r\n", None).unwrap();

        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.headers().is_empty());
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_echo_plain() {
        let response = handle(b"GET /echo/abc HTTP/1.1\r\n\r\n", None).unwrap();

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.header("Content-Type"), Some("text/plain"));
        assert_eq!(response.header("Content-Length"), Some("3"));
        assert_eq!(response.header("Content-Encoding"), None);
        assert_eq!(response.body(), b"abc");
    }

    #[test]
    fn test_echo_gzip_negotiated() {
        use flate2::read::GzDecoder;
        use std::io::Read;

        let raw = b"GET /echo/abc HTTP/1.1\r\nAccept-Encoding: gzip\r\n\r\n";
        let response = handle(raw, None).unwrap();

        assert_eq!(response.header("Content-Encoding"), Some("gzip"));
        // Content-Length es la longitud COMPRIMIDA, no la original
        assert_eq!(
            response.header("Content-Length"),
            Some(response.body().len().to_string().as_str())
        );

        let mut decoder = GzDecoder::new(response.body());
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed).unwrap();
        assert_eq!(decompressed, b"abc");
    }

    #[test]
    fn test_echo_header_name_case_sensitive() {
        // "accept-encoding" en minúsculas NO matchea: lookup exacto
        let raw = b"GET /echo/abc HTTP/1.1\r\naccept-encoding: gzip\r\n\r\n";
        let response = handle(raw, None).unwrap();

        assert_eq!(response.header("Content-Encoding"), None);
        assert_eq!(response.body(), b"abc");
    }

    #[test]
    fn test_user_agent_echoed() {
        let raw = b"GET /user-agent HTTP/1.1\r\nUser-Agent: test-client/1.0\r\n\r\n";
        let response = handle(raw, None).unwrap();

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"test-client/1.0");
        assert_eq!(response.header("Content-Length"), Some("15"));
    }

    #[test]
    fn test_user_agent_missing_is_fault() {
        // Decisión documentada: header ausente = fault de conexión
        let result = handle(b"GET /user-agent HTTP/1.1\r\n\r\n", None);

        assert!(matches!(result, Err(HandlerError::MissingUserAgent)));
    }

    #[test]
    fn test_file_get_existing() {
        let store = temp_store();
        store.create_and_write("foo.txt", b"hello world").unwrap();

        let response = handle(b"GET /files/foo.txt HTTP/1.1\r\n\r\n", Some(&store)).unwrap();

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(
            response.header("Content-Type"),
            Some("application/octet-stream")
        );
        assert_eq!(response.body(), b"hello world");
    }

    #[test]
    fn test_file_get_missing_is_404() {
        let store = temp_store();

        let response = handle(b"GET /files/nope.txt HTTP/1.1\r\n\r\n", Some(&store)).unwrap();

        assert_eq!(response.status(), StatusCode::NotFound);
        assert!(response.body().is_empty());
        assert!(response.headers().is_empty());
    }

    #[test]
    fn test_file_get_without_directory_is_404() {
        let response = handle(b"GET /files/foo.txt HTTP/1.1\r\n\r\n", None).unwrap();

        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_file_create_writes_body() {
        let store = temp_store();
        let raw = b"POST /files/new.txt HTTP/1.1\r\nContent-Length: 12\r\n\r\npayload-data";

        let response = handle(raw, Some(&store)).unwrap();

        assert_eq!(response.status(), StatusCode::Created);
        assert!(response.headers().is_empty());
        assert_eq!(store.read_all("new.txt").unwrap(), b"payload-data");
    }

    #[test]
    fn test_file_create_roundtrip() {
        // Propiedad write-then-read: exacta e idempotente
        let store = temp_store();

        let post = b"POST /files/rt.txt HTTP/1.1\r\n\r\nround-trip";
        handle(post, Some(&store)).unwrap();

        let get = handle(b"GET /files/rt.txt HTTP/1.1\r\n\r\n", Some(&store)).unwrap();
        assert_eq!(get.body(), b"round-trip");
    }

    #[test]
    fn test_file_create_existing_is_fault() {
        let store = temp_store();
        store.create_and_write("dup.txt", b"first").unwrap();

        let raw = b"POST /files/dup.txt HTTP/1.1\r\n\r\nsecond";
        let result = handle(raw, Some(&store));

        assert!(matches!(
            result,
            Err(HandlerError::FileCreate(StoreError::AlreadyExists(_)))
        ));
    }

    #[test]
    fn test_file_create_without_directory_is_fault() {
        let raw = b"POST /files/new.txt HTTP/1.1\r\n\r\ndata";
        let result = handle(raw, None);

        assert!(matches!(result, Err(HandlerError::NoDirectory)));
    }

    #[test]
    fn test_not_found_is_headerless_404() {
        let response = handle(b"GET /nonexistent HTTP/1.1\r\n\r\n", None).unwrap();

        assert_eq!(response.status(), StatusCode::NotFound);
        assert!(response.headers().is_empty());
        assert!(response.body().is_empty());
    }
}
