use anyhow::Result;
use robot_order_submit::orchestrator::App;
use robot_order_submit::utils::logging;
use robot_order_submit::Config;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = Config::from_env();

    App::initialize(config).await?.run().await?;

    Ok(())
}
