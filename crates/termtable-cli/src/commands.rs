use super::args::{Cli, Commands};
use super::handlers;
use crate::config;
use crate::terminal::Environment;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    let env = Environment::detect(cli.no_color);

    match cli.command {
        Commands::Render(args) => {
            let config = config::load(cli.config.as_deref())?;
            handlers::render::handle(&args, &config, &env)
        }
        Commands::Convert(args) => handlers::convert::handle(&args),
        Commands::Inspect(args) => {
            let config = config::load(cli.config.as_deref())?;
            handlers::inspect::handle(&args, &config, &env)
        }
        Commands::Styles => handlers::styles::handle(&env),
        Commands::Themes => handlers::themes::handle(&env),
    }
}
