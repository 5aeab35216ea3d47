//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa un parser HTTP/1.1 desde cero, consumiendo líneas
//! del [`LineReader`](crate::http::LineReader).
//!
//! ## Formato de un Request HTTP/1.1
//!
//! ```text
//! GET /echo/abc HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! User-Agent: curl/7.68.0\r\n
//! \r\n
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /target HTTP/1.1`
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: lo que ya quedó buffereado después de la línea vacía
//!
//! El método se guarda como string crudo: métodos desconocidos pasan sin
//! interpretarse y el router los resuelve a NotFound. Los nombres de header
//! se comparan de forma exacta (case-sensitive); es una simplificación
//! deliberada frente al RFC, no un bug.

use crate::http::LineReader;
use std::collections::HashMap;
use std::io::Read;

/// Representa un request HTTP/1.1 parseado
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP crudo ("GET", "POST", u otro sin interpretar)
    method: String,

    /// Request-target crudo (ej: "/echo/abc"), sin URL-decode
    target: String,

    /// Headers HTTP, claves tal como llegaron (lookup case-sensitive)
    headers: HashMap<String, String>,

    /// Body del request (captura best-effort, ver reader.rs)
    body: Vec<u8>,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug)]
pub enum ParseError {
    /// Request line presente pero sin método o target
    InvalidRequestLine(String),

    /// Header sin el separador ": "
    InvalidHeader(String),

    /// Error de I/O leyendo del stream
    Io(std::io::Error),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidRequestLine(line) => {
                write!(f, "Invalid request line: {:?}", line)
            }
            ParseError::InvalidHeader(line) => write!(f, "Invalid header: {:?}", line),
            ParseError::Io(e) => write!(f, "I/O error while parsing: {}", e),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<std::io::Error> for ParseError {
    fn from(e: std::io::Error) -> Self {
        ParseError::Io(e)
    }
}

impl Request {
    /// Parsea un request consumiendo líneas del reader
    ///
    /// # Retorna
    ///
    /// * `Ok(Request)` - Request parseado exitosamente
    /// * `Err(ParseError)` - Request line o header malformado, o error de I/O
    ///
    /// Si el stream se cierra antes de enviar la request line, se retorna un
    /// request con método y target vacíos: el caller lo trata como "sin
    /// ruta" y responde 404.
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use std::io::Cursor;
    /// use http11_server::http::{LineReader, Request};
    ///
    /// let raw = b"GET /echo/abc HTTP/1.1\r\nHost: localhost\r\n\r\n";
    /// let mut reader = LineReader::new(Cursor::new(raw.to_vec()));
    /// let request = Request::read_from(&mut reader).unwrap();
    ///
    /// assert_eq!(request.method(), "GET");
    /// assert_eq!(request.target(), "/echo/abc");
    /// assert_eq!(request.header("Host"), Some("localhost"));
    /// ```
    pub fn read_from<R: Read>(reader: &mut LineReader<R>) -> Result<Self, ParseError> {
        // 1. Request line
        let (method, target) = match reader.next_line()? {
            Some(line) if !line.is_empty() => Self::parse_request_line(&line)?,
            // Stream cerrado de inmediato: request vacío, el router dará 404
            _ => (String::new(), String::new()),
        };

        // 2. Headers hasta la línea vacía (o fin del stream)
        let headers = Self::parse_headers(reader)?;

        // 3. Body: un solo drain de lo que ya quedó buffereado
        let body = reader.drain_available();

        Ok(Request {
            method,
            target,
            headers,
            body,
        })
    }

    /// Parsea la request line (primera línea del request)
    ///
    /// Formato: `GET /target HTTP/1.1`. Separa por espacios simples; una
    /// línea sin los dos primeros tokens es un fault de parseo.
    fn parse_request_line(line: &str) -> Result<(String, String), ParseError> {
        let mut parts = line.split(' ');
        let method = parts.next().unwrap_or_default();
        let target = parts
            .next()
            .ok_or_else(|| ParseError::InvalidRequestLine(line.to_string()))?;

        if method.is_empty() || target.is_empty() {
            return Err(ParseError::InvalidRequestLine(line.to_string()));
        }

        Ok((method.to_string(), target.to_string()))
    }

    /// Parsea los headers HTTP hasta la línea vacía
    ///
    /// Cada header tiene formato `Name: Value` y se separa en la primera
    /// ocurrencia de `": "`. Claves duplicadas: gana la última. Una línea
    /// sin `": "` es un fault (no se descarta en silencio).
    fn parse_headers<R: Read>(
        reader: &mut LineReader<R>,
    ) -> Result<HashMap<String, String>, ParseError> {
        let mut headers = HashMap::new();

        loop {
            match reader.next_line()? {
                // La línea vacía (o el fin del stream) marca el fin de los headers
                None => break,
                Some(line) if line.is_empty() => break,
                Some(line) => match line.split_once(": ") {
                    Some((name, value)) => {
                        headers.insert(name.to_string(), value.to_string());
                    }
                    None => return Err(ParseError::InvalidHeader(line)),
                },
            }
        }

        Ok(headers)
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP crudo del request
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Obtiene el request-target crudo
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Obtiene un header específico (lookup exacto, case-sensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
