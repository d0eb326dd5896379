use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres backing for the document store. Unset means in-memory.
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub local_storage_path: PathBuf,
    pub business: BusinessConfig,
    pub admin: AdminCredentials,
    pub low_stock_threshold: i32,
}

#[derive(Debug, Clone)]
pub struct BusinessConfig {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            name: "Goodwin Traders".to_string(),
            phone: "+94756272858".to_string(),
        }
    }
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            host: "127.0.0.1".to_string(),
            port: 3000,
            local_storage_path: PathBuf::from("goodwin_storage.json"),
            business: BusinessConfig::default(),
            admin: AdminCredentials::default(),
            low_stock_threshold: 5,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());
        let host = env::var("APP_HOST").unwrap_or(defaults.host);
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(defaults.port);
        let local_storage_path = env::var("LOCAL_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.local_storage_path);
        let business = BusinessConfig {
            name: env::var("BUSINESS_NAME").unwrap_or(defaults.business.name),
            phone: env::var("BUSINESS_PHONE").unwrap_or(defaults.business.phone),
        };
        let admin = AdminCredentials {
            username: env::var("ADMIN_USERNAME").unwrap_or(defaults.admin.username),
            password: env::var("ADMIN_PASSWORD").unwrap_or(defaults.admin.password),
        };
        let low_stock_threshold = env::var("LOW_STOCK_THRESHOLD")
            .ok()
            .and_then(|t| t.parse::<i32>().ok())
            .unwrap_or(defaults.low_stock_threshold);
        Ok(Self {
            database_url,
            host,
            port,
            local_storage_path,
            business,
            admin,
            low_stock_threshold,
        })
    }
}
