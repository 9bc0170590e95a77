use clap::{Args as ClapArgs, Parser};
use devcamper_core::{
    domain::common::{DatabaseConfig, DevcamperConfig, GeocoderConfig, QueryConfig, TotalCount},
    infrastructure::geocoder::mapquest::DEFAULT_MAPQUEST_URL,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "devcamper-api", author, version, about)]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub database: DatabaseArgs,

    #[command(flatten)]
    pub geocoder: GeocoderArgs,

    #[command(flatten)]
    pub query: QueryArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(id = "server_host", long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(id = "server_port", long = "server-port", env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Prefix every route is mounted under, e.g. `/devcamper`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "server-allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long = "server-tls-cert", env = "SERVER_TLS_CERT", requires = "tls_key")]
    pub tls_cert: Option<String>,

    #[arg(long = "server-tls-key", env = "SERVER_TLS_KEY", requires = "tls_cert")]
    pub tls_key: Option<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct DatabaseArgs {
    #[arg(id = "database_host", long = "database-host", env = "DATABASE_HOST", default_value = "localhost")]
    pub host: String,

    #[arg(id = "database_port", long = "database-port", env = "DATABASE_PORT", default_value_t = 5432)]
    pub port: u16,

    #[arg(long = "database-user", env = "DATABASE_USER", default_value = "postgres")]
    pub user: String,

    #[arg(
        long = "database-password",
        env = "DATABASE_PASSWORD",
        default_value = "postgres",
        hide_env_values = true
    )]
    pub password: String,

    #[arg(long = "database-name", env = "DATABASE_NAME", default_value = "devcamper")]
    pub name: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct GeocoderArgs {
    #[arg(
        long = "geocoder-api-key",
        env = "GEOCODER_API_KEY",
        default_value = "",
        hide_env_values = true
    )]
    pub api_key: String,

    #[arg(long = "geocoder-url", env = "GEOCODER_URL", default_value = DEFAULT_MAPQUEST_URL)]
    pub base_url: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct QueryArgs {
    #[arg(long = "default-page-size", env = "DEFAULT_PAGE_SIZE", default_value_t = 25)]
    pub default_page_size: u64,

    /// Count the pagination total against the filtered set instead of the whole collection.
    #[arg(long = "count-filtered", env = "COUNT_FILTERED")]
    pub count_filtered: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    /// Used when `RUST_LOG` is not set.
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info,tower_http=debug,sqlx=warn")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON")]
    pub json: bool,
}

impl From<DatabaseArgs> for DatabaseConfig {
    fn from(args: DatabaseArgs) -> Self {
        DatabaseConfig {
            host: args.host,
            port: args.port,
            username: args.user,
            password: args.password,
            name: args.name,
        }
    }
}

impl From<Args> for DevcamperConfig {
    fn from(args: Args) -> Self {
        DevcamperConfig {
            database: args.database.into(),
            geocoder: GeocoderConfig {
                api_key: args.geocoder.api_key,
                base_url: args.geocoder.base_url,
            },
            query: QueryConfig {
                default_page_size: args.query.default_page_size,
                total_count: if args.query.count_filtered {
                    TotalCount::Filtered
                } else {
                    TotalCount::Unfiltered
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_convert_into_config() {
        let args = Args::parse_from(["devcamper-api", "--database-name", "camps"]);
        let config = DevcamperConfig::from(args);

        assert_eq!(config.database.name, "camps");
        assert_eq!(config.query.default_page_size, 25);
        assert_eq!(config.query.total_count, TotalCount::Unfiltered);
        assert_eq!(config.geocoder.base_url, DEFAULT_MAPQUEST_URL);
    }

    #[test]
    fn test_count_filtered_flag() {
        let args = Args::parse_from(["devcamper-api", "--count-filtered"]);
        assert_eq!(
            DevcamperConfig::from(args).query.total_count,
            TotalCount::Filtered
        );
    }
}
