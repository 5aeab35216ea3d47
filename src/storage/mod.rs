//! # File Store
//! src/storage/mod.rs
//!
//! Este módulo implementa el colaborador de filesystem para las rutas
//! `/files/...`. Expone exactamente las tres operaciones del contrato:
//! existe, leer todo y crear-y-escribir. No define permisos, encoding ni
//! sanitización de traversal: el nombre llega verbatim desde el router.
//!
//! Dos workers pueden correr estas operaciones en paralelo sobre el mismo
//! nombre; no hay locking ni garantía transaccional (el interleaving de una
//! creación contra una lectura concurrente queda indefinido).

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Errores de la operación de creación de archivos
#[derive(Debug)]
pub enum StoreError {
    /// El archivo ya existe: la creación no sobrescribe
    AlreadyExists(String),

    /// Error de I/O creando o escribiendo
    Io(io::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::AlreadyExists(name) => write!(f, "File already exists: {}", name),
            StoreError::Io(e) => write!(f, "File I/O error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

/// Acceso a archivos dentro del directorio servido
///
/// El directorio se configura una vez al arranque y es de solo lectura
/// después; cada worker recibe una referencia compartida.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Crea un store enraizado en el directorio servido
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Directorio raíz del store
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Verifica si el archivo existe en el directorio servido
    pub fn exists(&self, name: &str) -> bool {
        self.dir.join(name).exists()
    }

    /// Lee el contenido completo de un archivo
    pub fn read_all(&self, name: &str) -> io::Result<Vec<u8>> {
        fs::read(self.dir.join(name))
    }

    /// Crea un archivo nuevo y escribe los bytes
    ///
    /// Falla con `AlreadyExists` si el archivo ya existe (semántica
    /// create-new, sin sobrescritura) y con `Io` ante cualquier otro error.
    pub fn create_and_write(&self, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.dir.join(name);

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| {
                if e.kind() == io::ErrorKind::AlreadyExists {
                    StoreError::AlreadyExists(name.to_string())
                } else {
                    StoreError::Io(e)
                }
            })?;

        file.write_all(bytes).map_err(StoreError::Io)?;
        file.flush().map_err(StoreError::Io)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    /// Helper: crea un directorio temporal único para cada test
    fn temp_store() -> FileStore {
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "http11_store_test_{}_{}",
            std::process::id(),
            id
        ));
        fs::create_dir_all(&dir).expect("create temp dir");
        FileStore::new(dir)
    }

    #[test]
    fn test_exists_false_for_missing_file() {
        let store = temp_store();
        assert!(!store.exists("missing.txt"));
    }

    #[test]
    fn test_create_then_read_roundtrip() {
        let store = temp_store();

        store.create_and_write("new.txt", b"payload-data").unwrap();

        assert!(store.exists("new.txt"));
        assert_eq!(store.read_all("new.txt").unwrap(), b"payload-data");
    }

    #[test]
    fn test_create_existing_file_fails() {
        let store = temp_store();

        store.create_and_write("dup.txt", b"first").unwrap();
        let result = store.create_and_write("dup.txt", b"second");

        assert!(matches!(result, Err(StoreError::AlreadyExists(_))));
        // El contenido original queda intacto
        assert_eq!(store.read_all("dup.txt").unwrap(), b"first");
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let store = temp_store();
        assert!(store.read_all("missing.txt").is_err());
    }

    #[test]
    fn test_create_empty_body() {
        let store = temp_store();

        store.create_and_write("empty.txt", b"").unwrap();

        assert!(store.exists("empty.txt"));
        assert!(store.read_all("empty.txt").unwrap().is_empty());
    }
}
