//! Race to the Bottom participant service
//!
//! Serves the participant list the browser client reads before a race.

use actix_web::{App, HttpServer, middleware};

use race_to_the_bottom::Settings;
use race_to_the_bottom::server::{configure, cors, shared_registry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load();
    let bind_address = ("0.0.0.0", settings.port);
    log::info!("Race to the Bottom server running on port {}", settings.port);

    let registry = shared_registry();

    HttpServer::new(move || {
        App::new()
            .wrap(cors())
            .wrap(middleware::Logger::default())
            .app_data(registry.clone())
            .configure(configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
