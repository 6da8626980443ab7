use actix::Actor;
use actix_web::{web, App, HttpServer};
use backend::config::bots::BotsConfig;
use backend::config::llm::LlmConfig;
use backend::config::server::ServerConfig;
use backend::middleware::cors::cors_middleware;
use backend::routes;
use backend::ws::hub::GameServer;
use backend::AppState;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let server = match ServerConfig::from_env() {
        Ok(server) => server,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    let bots = BotsConfig::from_env();
    let llm = LlmConfig::from_env();

    println!(
        "🚀 Starting Gongzhu Backend on http://{}:{}",
        server.host, server.port
    );
    match &llm {
        Some(cfg) => println!("🤖 Bot decisions: {} ({})", cfg.kind.as_str(), cfg.model),
        None => println!("🤖 Bot decisions: heuristic ({})", bots.difficulty.as_str()),
    }

    let game_server = GameServer::new(bots, llm).start();
    let data = web::Data::new(AppState::new(game_server));

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
