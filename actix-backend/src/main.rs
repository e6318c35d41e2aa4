use std::io;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web::Data, App, HttpServer};
use clap::{Parser, Subcommand};

use snippets_backend::{commands, db, middleware::Authenticate, routes, AppState, Settings};

#[derive(Debug, Parser)]
#[command(name = "snippets-backend", version, about = "Code snippet sharing API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply migrations and start the HTTP server (the default)
    Serve,
    /// Apply pending migrations and exit
    Migrate,
    /// Create a user account
    #[command(name = "createuser")]
    CreateUser {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = Settings::from_env().map_err(|e| io::Error::other(format!("configuration: {e}")))?;

    let pool = db::connect(&settings.database_url)
        .await
        .map_err(|e| io::Error::other(format!("connecting to {}: {e}", settings.database_url)))?;
    db::migrate(&pool)
        .await
        .map_err(|e| io::Error::other(format!("migrations: {e}")))?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Migrate => {
            log::info!("migrations applied to {}", settings.database_url);
            Ok(())
        }
        Command::CreateUser { username, password } => {
            let user = commands::create_user(&pool, &settings, &username, &password)
                .await
                .map_err(|e| io::Error::other(format!("createuser: {e}")))?;
            println!("Created user {} with id {}", user.username, user.id);
            Ok(())
        }
        Command::Serve => serve(pool, settings).await,
    }
}

async fn serve(pool: sqlx::SqlitePool, settings: Settings) -> io::Result<()> {
    let bind = (settings.host.clone(), settings.port);
    let app_data = Data::new(AppState { db: pool, settings });
    let authenticate = Authenticate::new(app_data.clone());

    log::info!("listening on http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(app_data.clone())
            .wrap(Logger::default())
            .wrap(cors)
            .configure(|cfg| routes::config(cfg, authenticate.clone()))
    })
    .bind(bind)?
    .run()
    .await
}
