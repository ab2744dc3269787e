use actix_cors::Cors;
use actix_web::{middleware::Logger, web::Data, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};

use vitamins_chat::config::AppConfig;
use vitamins_chat::model::Backends;
use vitamins_chat::web::{routes, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting vitamins chat service");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Upstream clients live for the whole process
    let backends = match Backends::connect(&config).await {
        Ok(backends) => {
            info!("Upstream clients initialized");
            backends
        }
        Err(e) => {
            error!("Failed to initialize upstream clients: {:#}", e);
            std::process::exit(1);
        }
    };

    let app_state = Data::new(AppState { backends });

    info!("Listening on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        // Open to any site for now; narrow the origin list per deployment
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
