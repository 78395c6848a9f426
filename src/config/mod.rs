pub mod connection;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[cfg(feature = "cli")]
mod cli {
    use super::connection::{ConnectionParams, DEFAULT_DATABASE, DEFAULT_HOST, DEFAULT_USER};
    use crate::core::{ConfigProvider, Guest};
    use crate::domain::ports::{DEFAULT_COLUMNS, DEFAULT_TABLE};
    use crate::utils::error::Result;
    use crate::utils::logger::LogFormat;
    use crate::utils::validation::{
        validate_columns, validate_database_url, validate_guest, validate_identifier, Validate,
    };
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "guest-loader")]
    #[command(about = "Insert guest records with a prepared statement")]
    pub struct CliConfig {
        /// Full connection URL (mysql://, mariadb:// or sqlite:); overrides the separate parts
        #[arg(long, env = "DATABASE_URL")]
        pub database_url: Option<String>,

        #[arg(long, env = "DB_HOST", default_value = DEFAULT_HOST)]
        pub host: String,

        #[arg(long, env = "DB_USER", default_value = DEFAULT_USER)]
        pub user: String,

        #[arg(long, env = "DB_PASSWORD", default_value = "", hide_env_values = true)]
        pub password: String,

        #[arg(long, env = "DB_NAME", default_value = DEFAULT_DATABASE)]
        pub database: String,

        #[arg(long, default_value = DEFAULT_TABLE)]
        pub table: String,

        /// Guest to insert as "first,last,email"; repeatable. Defaults to the two built-in guests
        #[arg(long = "guest", value_name = "FIRST,LAST,EMAIL")]
        pub guests: Vec<Guest>,

        /// Run all inserts in one transaction
        #[arg(long)]
        pub transactional: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, value_enum, default_value_t = LogFormat::Text)]
        pub log_format: LogFormat,
    }

    impl CliConfig {
        fn connection_params(&self) -> ConnectionParams {
            ConnectionParams {
                host: self.host.clone(),
                user: self.user.clone(),
                password: self.password.clone(),
                database: self.database.clone(),
            }
        }
    }

    impl ConfigProvider for CliConfig {
        fn database_url(&self) -> Result<String> {
            match &self.database_url {
                Some(url) => Ok(url.clone()),
                None => self.connection_params().to_url(),
            }
        }

        fn table(&self) -> &str {
            &self.table
        }

        fn columns(&self) -> Vec<String> {
            DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect()
        }

        fn guests(&self) -> &[Guest] {
            &self.guests
        }

        fn transactional(&self) -> bool {
            self.transactional
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            let url = self.database_url()?;
            validate_database_url("database_url", &url)?;
            validate_identifier("table", &self.table)?;
            validate_columns("columns", &self.columns())?;
            for (index, guest) in self.guests.iter().enumerate() {
                validate_guest(index, guest)?;
            }
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::utils::error::LoaderError;

        #[test]
        fn test_defaults_connect_to_local_demo_database() {
            let config = CliConfig::parse_from(["guest-loader"]);
            assert_eq!(config.table, "MYGuests");
            assert!(config.guests.is_empty());
            assert!(!config.transactional);
            // DATABASE_URL may be set in the environment running the tests
            if config.database_url.is_none() {
                assert!(config.database_url().unwrap().starts_with("mysql://"));
            }
        }

        #[test]
        fn test_parse_guest_flags() {
            let config = CliConfig::parse_from([
                "guest-loader",
                "--database-url",
                "sqlite::memory:",
                "--guest",
                "Ada,Lovelace,ada@example.com",
                "--guest",
                "Alan,Turing,alan@example.com",
                "--transactional",
            ]);
            assert_eq!(config.guests.len(), 2);
            assert_eq!(config.guests[1].first_name, "Alan");
            assert_eq!(config.database_url().unwrap(), "sqlite::memory:");
            assert!(config.transactional());
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_malformed_guest_flag_is_a_parse_error() {
            let result = CliConfig::try_parse_from(["guest-loader", "--guest", "Ada,Lovelace"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_unusable_host_is_a_configuration_error() {
            let config = CliConfig::parse_from(["guest-loader", "--host", "bad host"]);
            // DATABASE_URL in the environment would bypass the host
            if config.database_url.is_some() {
                return;
            }

            let err = config.database_url().unwrap_err();
            assert!(matches!(err, LoaderError::InvalidConfigValueError { .. }));
            assert_eq!(err.exit_code(), 1);
        }

        #[test]
        fn test_invalid_table_fails_validation() {
            let config = CliConfig::parse_from([
                "guest-loader",
                "--database-url",
                "sqlite::memory:",
                "--table",
                "MYGuests(First_name",
            ]);
            assert!(config.validate().is_err());
        }
    }
}
