use clap::Parser;
use placenames::{api::Api, app, cli::Args, render::Console};
use std::io;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    args.init_logging();

    let api = Api::new(&args.base_url);
    let mut console = Console::new(io::stdout().lock(), !args.no_color);
    let outcome = app::run(io::stdin().lock(), &mut console, &api, args.username.as_deref())?;
    log::debug!("run finished: {outcome:?}");

    Ok(())
}
