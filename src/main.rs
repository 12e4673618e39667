use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use tracing::{error, info};

use linkdeck::api::middleware::SessionAuth;
use linkdeck::api::services::dashboard::routes::api_routes;
use linkdeck::api::services::{AppStartTime, health_routes, public_routes};
use linkdeck::config;
use linkdeck::services::LinkService;
use linkdeck::storage::StorageFactory;
use linkdeck::system::logging::init_logging;

fn build_cors(origins: &[String]) -> Cors {
    // 未配置来源时只允许同源请求
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_any_header()
        .supports_credentials()
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(origin);
    }
    cors
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::init_config();
    let _guard = init_logging(config);

    // 初始化存储（连接 + 迁移）
    let storage = match StorageFactory::create().await {
        Ok(storage) => storage,
        Err(e) => {
            error!("Failed to initialize storage: {}", e);
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    let link_service = Arc::new(LinkService::new(storage.clone()));

    // 记录程序启动时间
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting server at http://{}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(link_service.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .wrap(build_cors(&config.server.cors_origins))
            .service(api_routes().wrap(SessionAuth))
            .service(public_routes())
            .service(health_routes())
    })
    .bind(bind_address)?
    .run()
    .await
}
