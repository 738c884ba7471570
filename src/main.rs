use waitlist::{configuration::get_configuration, telemetry, App};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_subscriber(telemetry::get_subscriber(
        "waitlist".to_string(),
        std::io::stdout,
    ));

    let configuration = get_configuration().expect("Failed to read configuration.");
    let app = App::build(configuration)?;
    app.run_until_stopped().await?;

    Ok(())
}
