//! # Lector de Líneas sobre el Stream
//! src/http/reader.rs
//!
//! Este módulo implementa un lector orientado a líneas sobre el stream de
//! bytes entrante de una conexión. Es la base del parser de requests:
//!
//! - `next_line()`: siguiente línea terminada en CRLF (o LF solo), sin
//!   incluir el terminador. Dos terminadores seguidos producen una línea
//!   vacía (la línea en blanco que cierra el bloque de headers).
//! - `drain_available()`: los bytes que ya quedaron en el buffer interno,
//!   sin bloquear esperando más. Se usa una sola vez para capturar el body
//!   de forma best-effort (NO se respeta Content-Length; ver DESIGN.md).
//!
//! Un error de lectura se propaga de inmediato al caller, sin reintentos.

use std::io::{self, Read};

/// Tamaño del buffer de lectura por chunk
const READ_CHUNK: usize = 4096;

/// Lector de líneas con buffer interno sobre cualquier `Read`
pub struct LineReader<R: Read> {
    inner: R,
    buffer: Vec<u8>,
    pos: usize,
    eof: bool,
}

impl<R: Read> LineReader<R> {
    /// Crea un lector sobre un stream de entrada
    ///
    /// # Ejemplo
    /// ```
    /// use std::io::Cursor;
    /// use http11_server::http::LineReader;
    ///
    /// let mut reader = LineReader::new(Cursor::new(b"GET / HTTP/1.1\r\n\r\n"));
    /// assert_eq!(reader.next_line().unwrap(), Some("GET / HTTP/1.1".to_string()));
    /// assert_eq!(reader.next_line().unwrap(), Some("".to_string()));
    /// assert_eq!(reader.next_line().unwrap(), None);
    /// ```
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buffer: Vec::with_capacity(READ_CHUNK),
            pos: 0,
            eof: false,
        }
    }

    /// Retorna la siguiente línea (sin el terminador), o `None` al final
    /// del stream
    ///
    /// Acepta tanto `\r\n` como `\n` solo como terminador. Si el stream
    /// termina con bytes pendientes sin terminador, esos bytes se retornan
    /// como última línea.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        loop {
            // Buscar un '\n' en lo que ya está en el buffer
            if let Some(offset) = self.buffer[self.pos..].iter().position(|&b| b == b'\n') {
                let end = self.pos + offset;
                let mut line_end = end;
                // Descartar el '\r' previo si el terminador fue CRLF
                if line_end > self.pos && self.buffer[line_end - 1] == b'\r' {
                    line_end -= 1;
                }
                let line = to_utf8(&self.buffer[self.pos..line_end])?;
                self.pos = end + 1;
                return Ok(Some(line));
            }

            if self.eof {
                // Stream terminado: los bytes restantes (si hay) son la última línea
                if self.pos < self.buffer.len() {
                    let line = to_utf8(&self.buffer[self.pos..])?;
                    self.pos = self.buffer.len();
                    return Ok(Some(line));
                }
                return Ok(None);
            }

            self.fill_buffer()?;
        }
    }

    /// Retorna los bytes que ya quedaron buffereados sin consumir,
    /// sin bloquear esperando más datos del stream
    ///
    /// Contrato débil a propósito: captura el body solo si ya llegó junto
    /// con los headers en las lecturas anteriores. Un body que llegue en un
    /// segmento TCP posterior no se captura.
    pub fn drain_available(&mut self) -> Vec<u8> {
        let rest = self.buffer[self.pos..].to_vec();
        self.pos = self.buffer.len();
        rest
    }

    /// Lee un chunk más del stream hacia el buffer interno
    fn fill_buffer(&mut self) -> io::Result<()> {
        let mut chunk = [0u8; READ_CHUNK];
        let n = self.inner.read(&mut chunk)?;
        if n == 0 {
            self.eof = true;
        } else {
            self.buffer.extend_from_slice(&chunk[..n]);
        }
        Ok(())
    }
}

/// Convierte bytes de una línea a String, validando UTF-8
fn to_utf8(bytes: &[u8]) -> io::Result<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "non-UTF-8 request line"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(data: &[u8]) -> LineReader<Cursor<Vec<u8>>> {
        LineReader::new(Cursor::new(data.to_vec()))
    }

    #[test]
    fn test_next_line_crlf() {
        let mut r = reader(b"hello\r\nworld\r\n");
        assert_eq!(r.next_line().unwrap(), Some("hello".to_string()));
        assert_eq!(r.next_line().unwrap(), Some("world".to_string()));
        assert_eq!(r.next_line().unwrap(), None);
    }

    #[test]
    fn test_next_line_bare_lf() {
        let mut r = reader(b"hello\nworld\n");
        assert_eq!(r.next_line().unwrap(), Some("hello".to_string()));
        assert_eq!(r.next_line().unwrap(), Some("world".to_string()));
    }

    #[test]
    fn test_empty_line_between_terminators() {
        // La línea en blanco que separa headers del body
        let mut r = reader(b"Host: x\r\n\r\nbody");
        assert_eq!(r.next_line().unwrap(), Some("Host: x".to_string()));
        assert_eq!(r.next_line().unwrap(), Some("".to_string()));
    }

    #[test]
    fn test_trailing_bytes_without_terminator() {
        let mut r = reader(b"no-newline");
        assert_eq!(r.next_line().unwrap(), Some("no-newline".to_string()));
        assert_eq!(r.next_line().unwrap(), None);
    }

    #[test]
    fn test_empty_stream() {
        let mut r = reader(b"");
        assert_eq!(r.next_line().unwrap(), None);
    }

    #[test]
    fn test_drain_available_returns_buffered_body() {
        let mut r = reader(b"POST /x HTTP/1.1\r\n\r\npayload-data");
        assert!(r.next_line().unwrap().is_some()); // request line
        assert_eq!(r.next_line().unwrap(), Some("".to_string())); // línea vacía
        assert_eq!(r.drain_available(), b"payload-data".to_vec());
        // Un segundo drain no retorna nada
        assert!(r.drain_available().is_empty());
    }

    #[test]
    fn test_drain_available_empty_when_no_body() {
        let mut r = reader(b"GET / HTTP/1.1\r\n\r\n");
        r.next_line().unwrap();
        r.next_line().unwrap();
        assert!(r.drain_available().is_empty());
    }
}
