use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::admin_conf::AdminConfig;
use crate::config::app_conf::AppConfig;
use crate::config::mongo_conf::MongoConfig;
use crate::repository::student_repo::MongoStudentRepository;
use crate::router::student_router::student_router;
use crate::service::student_service::StudentServiceImpl;

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    pub async fn new() -> Self {
        let config = AppConfig::from_env();
        let mongo_config = MongoConfig::from_env().expect("Mongo config error");
        let admin_config = AdminConfig::from_env();

        let repo = Arc::new(
            MongoStudentRepository::new(&mongo_config)
                .await
                .expect("Student repo error"),
        );
        let student_service = Arc::new(StudentServiceImpl::new(repo, admin_config));

        // The admin dashboard is served from another origin.
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let router = Router::new()
            .merge(student_router(student_service))
            .route("/health", get(|| async { "OK" }))
            .layer(cors);

        App { config, router }
    }

    pub async fn start(self) {
        let addr = self.config.listen_addr();
        info!("🚀 Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await.expect("Failed to bind address");
        axum::serve(listener, self.router).await.expect("Failed to start server");
    }
}
