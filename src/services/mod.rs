//! Services module
//!
//! Este módulo contiene la lógica de negocio: el almacén de listas con su
//! disciplina de mutaciones confirmadas y el optimizador de rutas.

pub mod list_store_service;
pub mod route_optimizer_service;

#[cfg(test)]
pub mod testing;

pub use list_store_service::{ListStore, RouteSnapshot};
pub use route_optimizer_service::RouteOptimizerService;
