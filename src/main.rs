use clap::Parser;
use rapvalue::adapter::inbound::cli::command::{Cli, Commands, ConfigCommand};
use rapvalue::adapter::inbound::cli::output::{self, OutputConfig};
use rapvalue::adapter::inbound::cli::{config, rap};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    let result = match &cli.command {
        Commands::Rap(args) => rap::execute(args).await,
        Commands::Config(ConfigCommand::Init(args)) => {
            config::execute_init(&args.path, args.force).map(|()| true)
        }
        Commands::Config(ConfigCommand::Show(args)) => {
            config::execute_show(args.config.as_deref()).map(|()| true)
        }
        Commands::Config(ConfigCommand::Validate(args)) => {
            config::execute_validate(args.config.as_deref()).map(|()| true)
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            output::error(&e.to_string());
            std::process::exit(1);
        }
    }
}
