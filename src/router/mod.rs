//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo resuelve el par (método, request-target) a una de las rutas
//! fijas del servidor. Es una función pura sin estado: no hay tabla de
//! registro ni middleware.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → resolve() → RouteMatch → handler → Response
//! ```
//!
//! ## Precedencia
//!
//! Las reglas se evalúan en orden fijo y gana la primera que matchea:
//!
//! 1. `target == "/"` → `Root`
//! 2. `target` empieza con `/echo/` → `Echo(resto)`
//! 3. `target` empieza con `/user-agent` → `UserAgent`
//! 4. `GET` + target empieza con `/files/` → `FileGet(resto)`
//! 5. `POST` + target empieza con `/files/` → `FileCreate(resto)`
//! 6. Cualquier otra cosa → `NotFound`
//!
//! El orden es parte del contrato y no debe reordenarse. El parámetro de
//! ruta se toma verbatim: sin URL-decode, sin normalizar, sin chequear
//! secuencias `..` (gap de seguridad conocido y documentado en DESIGN.md).

/// Resultado del routing: la ruta matcheada con su parámetro extraído
///
/// Se construye una vez por request y la consume exactamente una vez la
/// etapa de respuesta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    /// `GET /` - respuesta 200 vacía
    Root,

    /// `/echo/{param}` - devuelve el parámetro como body
    Echo(String),

    /// `/user-agent` - devuelve el header User-Agent del request
    UserAgent,

    /// `GET /files/{name}` - lee un archivo del directorio servido
    FileGet(String),

    /// `POST /files/{name}` - crea un archivo en el directorio servido
    FileCreate(String),

    /// Sin ruta: 404
    NotFound,
}

/// Resuelve método y target a una ruta, con la precedencia fija del módulo
///
/// # Ejemplo
/// ```
/// use http11_server::router::{resolve, RouteMatch};
///
/// assert_eq!(resolve("GET", "/"), RouteMatch::Root);
/// assert_eq!(resolve("GET", "/echo/abc"), RouteMatch::Echo("abc".to_string()));
/// assert_eq!(resolve("DELETE", "/files/x"), RouteMatch::NotFound);
/// ```
pub fn resolve(method: &str, target: &str) -> RouteMatch {
    if target == "/" {
        RouteMatch::Root
    } else if let Some(param) = target.strip_prefix("/echo/") {
        RouteMatch::Echo(param.to_string())
    } else if target.starts_with("/user-agent") {
        RouteMatch::UserAgent
    } else if method == "GET" && target.starts_with("/files/") {
        RouteMatch::FileGet(target["/files/".len()..].to_string())
    } else if method == "POST" && target.starts_with("/files/") {
        RouteMatch::FileCreate(target["/files/".len()..].to_string())
    } else {
        RouteMatch::NotFound
    }
}
