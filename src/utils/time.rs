use chrono::{DateTime, Local, TimeZone};

/// Hora local "HH:MM:SS" para el historial de notificaciones
pub fn local_time_of_day() -> String {
    format_time_of_day(&Local::now())
}

pub fn format_time_of_day<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%H:%M:%S").to_string()
}
