use crate::common::{DomainError, DomainResult};
use crate::domains::grid::{Cell, Grid};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid: GridConfig,
    pub agv: AgvConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Rows of cell codes: 0 free, 1 blocked, 2 pickup, 3 delivery.
    pub cells: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgvConfig {
    pub id: String,
    pub start: [usize; 2],
    pub step_delay_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub postgres: PostgresConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Domain log file; `None` logs to the console only.
    pub file: Option<String>,
    pub level: String,
}

impl Config {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn build_grid(&self) -> DomainResult<Grid> {
        Grid::from_rows(&self.grid.cells)
    }

    /// The configured start cell, checked against `grid`.
    pub fn agv_start(&self, grid: &Grid) -> DomainResult<Cell> {
        let start = Cell::from(self.agv.start);
        if !grid.is_traversable(start) {
            return Err(DomainError::InvalidGrid {
                reason: format!("AGV start {} is outside the grid or blocked", start),
            });
        }
        Ok(start)
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.agv.step_delay_ms)
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.logging.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cells: vec![
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 1, 1, 0, 1, 1, 0, 1, 0],
                vec![0, 1, 1, 0, 1, 1, 0, 1, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 1, 1, 0, 1, 1, 0, 1, 0],
                vec![0, 1, 1, 0, 1, 1, 0, 1, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![2, 0, 0, 0, 0, 0, 0, 0, 3],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0],
            ],
        }
    }
}

impl Default for AgvConfig {
    fn default() -> Self {
        Self {
            id: "agv-1".to_string(),
            start: [8, 0],
            step_delay_ms: 150,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            postgres: PostgresConfig::default(),
        }
    }
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "warehouse_agv".to_string(),
            username: "postgres".to_string(),
            password: "password".to_string(),
            max_connections: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: Some("agv.log".to_string()),
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_deployment() {
        let config = Config::default();
        let grid = config.build_grid().unwrap();
        assert_eq!((grid.rows(), grid.cols()), (9, 9));
        assert_eq!(config.agv_start(&grid).unwrap(), Cell::new(8, 0));
        assert_eq!(config.step_delay(), Duration::from_millis(150));
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config = Config::from_toml_str(
            r#"
            [grid]
            cells = [[0, 0], [1, 0]]

            [agv]
            start = [0, 1]
            step_delay_ms = 5
            "#,
        )
        .unwrap();
        let grid = config.build_grid().unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(config.agv_start(&grid).unwrap(), Cell::new(0, 1));
        assert_eq!(config.agv.id, "agv-1");
        assert_eq!(config.step_delay(), Duration::from_millis(5));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_blocked_start_rejected() {
        let config = Config::from_toml_str(
            r#"
            [grid]
            cells = [[0, 1]]

            [agv]
            start = [0, 1]
            "#,
        )
        .unwrap();
        let grid = config.build_grid().unwrap();
        assert!(config.agv_start(&grid).is_err());
    }

    #[test]
    fn test_postgres_backend_parses() {
        let config = Config::from_toml_str(
            r#"
            [storage]
            backend = "postgres"

            [storage.postgres]
            host = "db"
            port = 5433
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        assert_eq!(config.storage.postgres.host, "db");
        assert_eq!(config.storage.postgres.port, 5433);
        assert_eq!(config.storage.postgres.database, "warehouse_agv");
    }
}
