//! Main entry point for the Creek River campground API server.
//! Wires the HTTP routes to the reservation store and admission engine.

use actix_web::{App, HttpResponse, HttpServer, middleware::Logger, web};
use postgres::database::*;
use web_handlers::*;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    log::info!("Starting Creek River campground server...");

    // Create database connection pool
    let pool = match create_connection_pool().await {
        Ok(pool) => {
            log::info!("Database pool created successfully");

            if let Err(e) = test_connection(&pool).await {
                log::error!("Database connection test failed: {}", e);
            }
            pool
        }
        Err(e) => {
            log::error!("Failed to create database pool: {}", e);
            log::error!("Check DATABASE_URL and that PostgreSQL is running");
            std::process::exit(1);
        }
    };

    log::info!("Server will be available at: http://0.0.0.0:8080");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(Logger::default())
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/campsites")
                            .route("", web::get().to(list_campsites))
                            .route("", web::post().to(create_campsite))
                            .route("/{id}", web::get().to(get_campsite))
                            .route("/{id}", web::put().to(update_campsite))
                            .route("/{id}", web::delete().to(delete_campsite)),
                    )
                    .service(
                        web::scope("/reservations")
                            .route("", web::get().to(list_reservations))
                            .route("", web::post().to(create_reservation))
                            .route("/{id}", web::delete().to(delete_reservation)),
                    )
                    .service(
                        web::scope("/userprofiles")
                            .route("", web::get().to(list_user_profiles))
                            .route("/{id}", web::get().to(get_user_profile)),
                    ),
            )
            .route(
                "/health",
                web::get().to(|| async { HttpResponse::Ok().body("OK") }),
            )
    })
    .bind("0.0.0.0:8080")?
    .run()
    .await
}
