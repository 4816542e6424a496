use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

/**
 * Command-line arguments for the application.
 */
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct ApplicationArguments {
    /**
     * Path to the configuration file. Defaults apply when omitted.
     */
    #[arg(short, long, global = true)]
    pub config_file: Option<String>,
    /**
     * Render every response envelope as JSON instead of text.
     */
    #[arg(long, global = true)]
    pub json: bool,
    /**
     * The console application to run.
     */
    #[command(subcommand)]
    pub command: ApplicationCommand,
}

/**
 * One subcommand per console application.
 */
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ApplicationCommand {
    /**
     * Enter marks and print report cards.
     */
    Students,
    /**
     * Rent and return vehicles loaded from a data file.
     */
    Vehicles {
        /**
         * Vehicle data file. Overrides `vehicles.dataFile` from the configuration.
         */
        #[arg(short, long)]
        file: Option<String>,
    },
    /**
     * Calculate the discount for a purchase.
     */
    Discount,
    /**
     * Register a new user.
     */
    Register,
    /**
     * Manage the product catalog.
     */
    Catalog,
}

/**
 * Represents the configuration for the application.
 */
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /**
     * Logging configuration for the application.
     */
    pub logging: LoggingConfig,
    /**
     * Database configuration. Only the registration and catalog applications need it.
     */
    pub database: Option<Database>,
    /**
     * Vehicle rental configuration.
     */
    pub vehicles: VehiclesConfig,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /**
     * Whether to log the target of the log message.
     */
    pub target: bool,
    /**
     * Whether to log thread IDs .
     */
    pub thread_ids: bool,
    /**
     * Whether to log thread names.
     */
    pub thread_names: bool,
    /**
     * Whether to log line numbers.
     */
    pub line_number: bool,
    /**
     * Whether to log the log level.
     */
    pub level: bool,
    /**
     * Whether to use ANSI colors in logs.
     */
    pub ansi: bool,
    /**
     * Whether to log the source file.
     */
    pub file: bool,
    /**
     * Path to the log file. Logs go to stderr when not set.
     */
    pub logfile: Option<String>,
    /**
     * Additional directives for logging configuration.
     */
    pub directives: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig { target: false, thread_ids: false, thread_names: false, line_number: false, level: true, ansi: true, file: false, logfile: None, directives: vec![] }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    /**
     * Whether to apply the bundled migrations on startup.
     */
    #[serde(default)]
    pub run_migrations: bool,
    /**
     * Type of the database (e.g., `PostgreSQL`).
     */
    pub db_type: DatabaseType,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DatabaseType {
    /**
     * `PostgreSQL` database type. `username` and `password` override the ones in the connection string.
     */
    #[serde(rename_all = "camelCase")]
    Postgresql {
        connection_string: String,
        username: Option<String>,
        password: Option<String>,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: u64,
        idle_timeout: u64,
        max_lifetime: u64,
    },
}

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehiclesConfig {
    /**
     * Vehicle data file loaded on startup.
     */
    pub data_file: Option<String>,
}
