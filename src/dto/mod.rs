//! DTOs
//!
//! Estructuras de datos que viajan por la red: API de persistencia de
//! listas y proveedor de optimización de rutas.

pub mod directions_dto;
pub mod my_list_dto;
