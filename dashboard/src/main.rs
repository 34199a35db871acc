#![deny(rust_2018_idioms)]

use dashboard::{Error, settings::Settings, startup::App};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let settings = Settings::new()?;
    settings.init_tracer();

    let app = App::build(&settings)?;
    let files = app.run().await?;

    info!("exported {} files", files.len());
    Ok(())
}
