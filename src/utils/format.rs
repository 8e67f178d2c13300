//! Formateo para presentación
//!
//! Las rutas guardan metros y segundos; el texto legible se genera
//! únicamente en el borde de presentación.

/// Formatear distancia en metros ("850 m", "1.2 km")
pub fn format_distance(meters: u64) -> String {
    if meters >= 1000 {
        format!("{:.1} km", meters as f64 / 1000.0)
    } else {
        format!("{} m", meters)
    }
}

/// Formatear duración en segundos ("12 min", "1 h 5 min")
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;

    if hours > 0 {
        format!("{} h {} min", hours, minutes)
    } else {
        format!("{} min", minutes)
    }
}
