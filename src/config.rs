use std::env;

#[derive(Debug, Clone)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

/// A seeded API user. Credentials are compared in plaintext; the token
/// endpoint is a lookup table, not a credential service.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub username: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,

    // API settings
    pub api_host: String,
    pub api_port: u16,

    // Seeded users for the token endpoint
    pub auth_users: Vec<UserRecord>,

    // Application metadata
    pub deployment: Deployment,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if required environment variables are
    /// not set, or `ConfigError::Invalid` if `AUTH_USERS` cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            // Database
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://enviro.db?mode=rwc".to_string()),

            // API settings
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),

            // Seeded users: "user:pass:role" entries, comma-separated
            auth_users: parse_auth_users(
                &env::var("AUTH_USERS")
                    .unwrap_or_else(|_| "alvin_admin:password123:admin".to_string()),
            )?,

            // Application metadata
            deployment: Deployment::from_str(
                &env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()),
            ),
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

fn parse_auth_users(raw: &str) -> Result<Vec<UserRecord>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let mut parts = entry.splitn(3, ':');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(username), Some(password), Some(role))
                    if !username.is_empty() && !password.is_empty() =>
                {
                    Ok(UserRecord {
                        username: username.to_string(),
                        password: password.to_string(),
                        role: role.to_string(),
                    })
                }
                _ => Err(ConfigError::Invalid("AUTH_USERS")),
            }
        })
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multiple_users() {
        let users = parse_auth_users("alice:secret:admin, bob:hunter2:user").unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].username, "alice");
        assert_eq!(users[0].role, "admin");
        assert_eq!(users[1].username, "bob");
        assert_eq!(users[1].password, "hunter2");
    }

    #[test]
    fn rejects_malformed_entry() {
        assert!(parse_auth_users("alice:secret").is_err());
        assert!(parse_auth_users(":x:admin").is_err());
    }
}
