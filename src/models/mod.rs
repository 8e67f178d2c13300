//! Models module
//!
//! Este módulo contiene los modelos de dominio: listas, ubicaciones y rutas.

pub mod location;
pub mod my_list;
pub mod route;

pub use location::*;
pub use my_list::*;
pub use route::*;
