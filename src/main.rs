mod api;
mod dao;
mod model;
mod service;
mod ui;

use std::fs::OpenOptions;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::Duration;

use crate::api::discounts::DiscountController;
use crate::api::products::ProductController;
use crate::api::students::StudentController;
use crate::api::users::UserController;
use crate::api::vehicles::VehicleController;
use crate::dao::products::ProductDao;
use crate::dao::users::UserDao;
use crate::dao::vehicles::VehicleDao;
use crate::model::apperror::{ApplicationError, ErrorType};
use crate::model::config::{ApplicationArguments, ApplicationCommand, Config, Database, DatabaseType, LoggingConfig};
use crate::service::discounts::DiscountService;
use crate::service::products::ProductService;
use crate::service::students::StudentService;
use crate::service::users::UserService;
use crate::service::vehicles::VehicleService;
use crate::ui::console::Console;

use clap::Parser;
use sqlx::postgres::PgConnectOptions;
use sqlx::{Pool, Postgres, pool};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::{Directive, LevelFilter};

/**
 * Entry point. Runs the console application selected on the command line.
 */
#[tokio::main(flavor = "current_thread")]
async fn main() -> std::io::Result<()> {
    let args = ApplicationArguments::parse();

    let config = get_config(args.config_file.as_deref())?;

    init_tracing(&config.logging)?;

    let stdin = std::io::stdin();
    let mut console = Console::new(stdin.lock(), std::io::stdout(), args.json);

    let result = match args.command {
        ApplicationCommand::Students => ui::students::run(&mut console, &StudentController::new(StudentService::new())),
        ApplicationCommand::Vehicles { file } => {
            let data_file = file.or(config.vehicles.data_file);
            let mut controller = VehicleController::new(VehicleService::new(VehicleDao::new()));
            ui::vehicles::run(&mut console, &mut controller, data_file.as_deref())
        }
        ApplicationCommand::Discount => ui::discounts::run(&mut console, &DiscountController::new(DiscountService::new())),
        ApplicationCommand::Register => {
            let connection_pool = get_connection_pool(config.database.as_ref()).await?;
            ui::users::run(&mut console, &UserController::new(UserService::new(UserDao::new(), connection_pool))).await
        }
        ApplicationCommand::Catalog => {
            let connection_pool = get_connection_pool(config.database.as_ref()).await?;
            ui::products::run(&mut console, &ProductController::new(ProductService::new(ProductDao::new(), connection_pool))).await
        }
    };

    match result {
        Ok(()) => Ok(()),
        Err(err) if err.error_type == ErrorType::EndOfInput => {
            tracing::debug!("Input closed, exiting");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/**
 * Initializes logging. Logs go to stderr, or to `logfile` when configured, so they never mix with console output.
 *
 * # Arguments
 * `logging`: The logging configuration.
 *
 * # Returns
 * A `Result` indicating success or failure.
 */
fn init_tracing(logging: &LoggingConfig) -> Result<(), std::io::Error> {
    let mut env_filter = EnvFilter::builder().with_default_directive(LevelFilter::WARN.into()).from_env_lossy();
    for directive in &logging.directives {
        env_filter = env_filter.add_directive(directive.parse::<Directive>().map_err(|err| std::io::Error::other(format!("Invalid logging directive {directive}: {err}")))?);
    }

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(logging.target)
        .with_thread_ids(logging.thread_ids)
        .with_thread_names(logging.thread_names)
        .with_line_number(logging.line_number)
        .with_level(logging.level)
        .with_file(logging.file);

    let result = match &logging.logfile {
        Some(logfile) => {
            let file = OpenOptions::new().create(true).append(true).open(logfile).map_err(|err| std::io::Error::other(format!("Failed to open log file {logfile}: {err}")))?;
            subscriber.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None => subscriber.with_ansi(logging.ansi).with_writer(std::io::stderr).try_init(),
    };
    result.map_err(|err| std::io::Error::other(format!("Failed to initialize logging: {err}")))
}

/**
 * Creates the connection pool and applies migrations when configured.
 *
 * # Arguments
 * `database`: The database configuration, if any.
 *
 * # Returns
 * The pool, `None` when no database is configured, or an error if the database cannot be reached.
 */
async fn get_connection_pool(database: Option<&Database>) -> Result<Option<Pool<Postgres>>, std::io::Error> {
    let Some(database) = database else {
        tracing::warn!("No database configured");
        return Ok(None);
    };
    let connection_pool: Pool<Postgres> = match &database.db_type {
        DatabaseType::Postgresql { connection_string, username, password, max_connections, min_connections, acquire_timeout, idle_timeout, max_lifetime } => {
            let mut connect_options = PgConnectOptions::from_str(connection_string).map_err(|err| std::io::Error::other(format!("Invalid connection string: {err}")))?;
            if let Some(username) = username {
                connect_options = connect_options.username(username);
            }
            if let Some(password) = password {
                connect_options = connect_options.password(password);
            }
            pool::PoolOptions::new()
                .max_connections(*max_connections)
                .min_connections(*min_connections)
                .acquire_timeout(Duration::from_millis(*acquire_timeout))
                .idle_timeout(Duration::from_millis(*idle_timeout))
                .max_lifetime(Duration::from_millis(*max_lifetime))
                .connect_with(connect_options)
                .await
                .map_err(|err| std::io::Error::other(format!("Failed to create database pool: {err}")))?
        }
    };
    if database.run_migrations {
        sqlx::migrate!("./sqlx-postgresql-migration/migrations")
            .run(&connection_pool)
            .await
            .map_err(|err| std::io::Error::other(format!("Failed to run migrations: {err}")))?;
        tracing::info!("Database migrations applied");
    }
    Ok(Some(connection_pool))
}

/**
 * Reads the configuration from the specified file. Defaults are used when no file is given.
 *
 * # Arguments
 * `config_file`: The path to the configuration file.
 *
 * # Returns
 * A `Result` containing the parsed `Config` or an `std::io::Error` if reading or parsing fails.
 */
fn get_config(config_file: Option<&str>) -> Result<Config, std::io::Error> {
    let Some(config_file) = config_file else {
        return Ok(Config::default());
    };
    let config_str: String = std::fs::read_to_string(config_file).map_err(|err| ApplicationError::new(ErrorType::Initialization, format!("Failed to read config file: {err}")))?;
    let config: Config = toml::from_str(&config_str).map_err(|err| ApplicationError::new(ErrorType::Initialization, format!("Failed to parse config file: {err}")))?;
    Ok(config)
}
