//! # Pool de Workers de Conexiones
//! src/server/pool.rs
//!
//! Implementa el modelo de concurrencia del servidor: una cola acotada de
//! conexiones aceptadas y un pool fijo de threads que las atienden.
//!
//! - El acceptor hace `push()` de cada `TcpStream`; si la cola está llena
//!   el push BLOQUEA hasta que haya espacio. Así la saturación degrada a
//!   encolamiento (primero acá, después en el backlog del listen), nunca a
//!   descartar conexiones.
//! - Cada worker hace `pop()` bloqueante y procesa una conexión completa de
//!   principio a fin; ninguna operación cruza workers.
//!
//! No hay cancelación, timeouts ni secuencia de shutdown: el proceso corre
//! hasta que lo terminan desde afuera.

use std::collections::VecDeque;
use std::net::TcpStream;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

/// Cola acotada y thread-safe de conexiones aceptadas
pub struct ConnectionQueue {
    inner: Mutex<VecDeque<TcpStream>>,

    /// Notifica a workers esperando conexiones
    ready: Condvar,

    /// Notifica al acceptor esperando espacio
    space: Condvar,

    /// Capacidad máxima de la cola
    capacity: usize,
}

impl ConnectionQueue {
    /// Crea una cola con la capacidad indicada
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(VecDeque::with_capacity(capacity)),
            ready: Condvar::new(),
            space: Condvar::new(),
            capacity,
        }
    }

    /// Encola una conexión; bloquea mientras la cola esté llena
    pub fn push(&self, stream: TcpStream) {
        let mut queue = self.inner.lock().unwrap();
        while queue.len() >= self.capacity {
            queue = self.space.wait(queue).unwrap();
        }
        queue.push_back(stream);
        self.ready.notify_one();
    }

    /// Desencola la conexión más antigua; bloquea mientras esté vacía
    pub fn pop(&self) -> TcpStream {
        let mut queue = self.inner.lock().unwrap();
        loop {
            if let Some(stream) = queue.pop_front() {
                self.space.notify_one();
                return stream;
            }
            queue = self.ready.wait(queue).unwrap();
        }
    }

    /// Intenta desencolar sin bloquear
    pub fn try_pop(&self) -> Option<TcpStream> {
        let mut queue = self.inner.lock().unwrap();
        let stream = queue.pop_front();
        if stream.is_some() {
            self.space.notify_one();
        }
        stream
    }

    /// Cantidad de conexiones esperando en la cola
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    /// Verifica si la cola está vacía
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Capacidad máxima de la cola
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Pool fijo de threads que atienden conexiones desde la cola
pub struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Lanza `size` workers que consumen de `queue` y ejecutan `handler`
    ///
    /// Cada worker corre un loop infinito `pop()` → `handler(stream)`. El
    /// handler es responsable de no hacer panic: un fault de conexión se
    /// maneja adentro y el worker sigue con la próxima.
    pub fn spawn<F>(size: usize, queue: Arc<ConnectionQueue>, handler: F) -> Self
    where
        F: Fn(TcpStream) + Send + Sync + 'static,
    {
        let handler = Arc::new(handler);
        let mut handles = Vec::with_capacity(size);

        for worker_id in 0..size {
            let queue = Arc::clone(&queue);
            let handler = Arc::clone(&handler);

            let handle = thread::Builder::new()
                .name(format!("worker-{}", worker_id))
                .spawn(move || loop {
                    let stream = queue.pop();
                    handler(stream);
                })
                .expect("failed to spawn worker thread");

            handles.push(handle);
        }

        Self { handles }
    }

    /// Cantidad de workers del pool
    pub fn size(&self) -> usize {
        self.handles.len()
    }
}
