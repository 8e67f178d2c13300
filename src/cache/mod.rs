//! Cache
//!
//! Este módulo contiene la cache de rutas calculadas y los candados por lista.

pub mod list_guards;
pub mod route_cache;

pub use list_guards::ListGuards;
pub use route_cache::RouteCache;
