use std::env;

use uuid::Uuid;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub dashboard: DashboardSettings,
    /// Simulated identity used for point-of-care writes when the request
    /// carries no `X-Acting-Staff` header.
    pub default_acting_staff_id: Option<Uuid>,
}

/// Tunables for the dashboard aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
    /// Patients in an area whose name contains this marker count as urgent.
    pub urgent_area_marker: String,
    /// Items with stock strictly below this value are reported as low.
    pub low_stock_threshold: i32,
    pub recent_admissions_limit: i64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            urgent_area_marker: "Urgencia".to_string(),
            low_stock_threshold: 15,
            recent_admissions_limit: 5,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        let defaults = DashboardSettings::default();

        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            dashboard: DashboardSettings {
                urgent_area_marker: env::var("URGENT_AREA_MARKER")
                    .ok()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or(defaults.urgent_area_marker),
                low_stock_threshold: env::var("LOW_STOCK_THRESHOLD")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.low_stock_threshold),
                recent_admissions_limit: env::var("RECENT_ADMISSIONS_LIMIT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .filter(|n: &i64| *n > 0)
                    .unwrap_or(defaults.recent_admissions_limit),
            },
            default_acting_staff_id: env::var("DEFAULT_ACTING_STAFF_ID")
                .ok()
                .and_then(|v| v.parse().ok()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_defaults() {
        let settings = DashboardSettings::default();
        assert_eq!(settings.urgent_area_marker, "Urgencia");
        assert_eq!(settings.low_stock_threshold, 15);
        assert_eq!(settings.recent_admissions_limit, 5);
    }
}
