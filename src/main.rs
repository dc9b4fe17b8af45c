use anyhow::Context;
use order_on_go::{configuration::Settings, startup::Application, telemetry::{get_subscriber, init_subscriber}};

#[actix_web::main]
async fn main() -> anyhow::Result<()>{
    let subscriber = get_subscriber("order-on-go".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let settings = Settings::get()
        .context("Failed to read configuration")?;

    let application = Application::new(settings).await?;
    application.run_until_stopped().await?;
    Ok(())
}
