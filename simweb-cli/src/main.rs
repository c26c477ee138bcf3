mod args;
mod logging;
mod run;

use clap::Parser;
use simweb_lib::Config;

use args::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose, args.log_file.as_deref())?;

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }

    let outcome = run::run(&config, &args).await?;
    for (name, value) in outcome.data.iter() {
        println!("{name}={value}");
    }
    if let Some(response) = outcome.response {
        println!("{response}");
    }
    Ok(())
}
