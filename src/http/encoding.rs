//! # Negociación y Codificación de Contenido
//! src/http/encoding.rs
//!
//! Este módulo implementa la única codificación soportada: gzip. La
//! negociación sigue la política observada del servidor original: si el
//! valor del header `Accept-Encoding` contiene el substring `gzip` (sin
//! parseo estricto de tokens), se comprime; si no, el payload pasa intacto.
//!
//! La salida es gzip válido y determinística para un mismo input con la
//! misma configuración del compresor, pero no se garantiza reproducibilidad
//! byte a byte entre implementaciones.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{self, Write};

/// Resultado de la negociación: bytes codificados o "sin codificar"
#[derive(Debug)]
pub enum Encoded {
    /// El cliente pidió gzip: body comprimido
    Gzip(Vec<u8>),

    /// No se pidió una codificación soportada: el payload va tal cual
    Identity,
}

/// Negocia y aplica la codificación para un payload
///
/// # Argumentos
///
/// * `payload` - Los bytes crudos del body
/// * `accept_encoding` - El valor del header `Accept-Encoding`, si llegó
///
/// # Ejemplo
///
/// ```
/// use http11_server::http::encoding::{encode, Encoded};
///
/// let out = encode(b"abc", Some("gzip, deflate")).unwrap();
/// assert!(matches!(out, Encoded::Gzip(_)));
///
/// let out = encode(b"abc", None).unwrap();
/// assert!(matches!(out, Encoded::Identity));
/// ```
pub fn encode(payload: &[u8], accept_encoding: Option<&str>) -> io::Result<Encoded> {
    match accept_encoding {
        Some(value) if value.contains("gzip") => Ok(Encoded::Gzip(gzip_compress(payload)?)),
        _ => Ok(Encoded::Identity),
    }
}

/// Comprime bytes con framing gzip estándar (deflate + header/trailer gzip)
pub fn gzip_compress(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn gzip_decompress(data: &[u8]) -> Vec<u8> {
        let mut decoder = GzDecoder::new(data);
        let mut out = Vec::new();
        decoder.read_to_end(&mut out).expect("valid gzip data");
        out
    }

    #[test]
    fn test_gzip_roundtrip() {
        let out = gzip_compress(b"abc").unwrap();
        assert_eq!(gzip_decompress(&out), b"abc");
    }

    #[test]
    fn test_encode_when_gzip_accepted() {
        let out = encode(b"hello", Some("gzip")).unwrap();
        match out {
            Encoded::Gzip(bytes) => assert_eq!(gzip_decompress(&bytes), b"hello"),
            Encoded::Identity => panic!("expected gzip encoding"),
        }
    }

    #[test]
    fn test_encode_gzip_among_other_tokens() {
        let out = encode(b"hello", Some("deflate, gzip, br")).unwrap();
        assert!(matches!(out, Encoded::Gzip(_)));
    }

    #[test]
    fn test_encode_identity_without_header() {
        let out = encode(b"hello", None).unwrap();
        assert!(matches!(out, Encoded::Identity));
    }

    #[test]
    fn test_encode_identity_for_other_encodings() {
        let out = encode(b"hello", Some("deflate, br")).unwrap();
        assert!(matches!(out, Encoded::Identity));
    }

    #[test]
    fn test_substring_match_is_deliberately_loose() {
        // Política observada: basta el substring, no hay parseo de tokens
        let out = encode(b"hello", Some("x-gzip")).unwrap();
        assert!(matches!(out, Encoded::Gzip(_)));
    }

    #[test]
    fn test_gzip_empty_payload_is_valid() {
        let out = gzip_compress(b"").unwrap();
        assert_eq!(gzip_decompress(&out), b"");
    }
}
