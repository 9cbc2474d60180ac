use log::info;

mod config;
mod handlers;
mod invitations;
mod models;
mod routes;


#[tokio::main]
async fn main() -> Result<(), lambda_http::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting Invitation Service Lambda");

    let settings = config::InvitationSettings::from_env();
    let app = routes::create_router(settings).await;

    lambda_http::run(app).await
}
