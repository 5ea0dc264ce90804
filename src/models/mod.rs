//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema PostgreSQL
//! (tablas `vehicles` y `trips`).

pub mod trip;
pub mod vehicle;
