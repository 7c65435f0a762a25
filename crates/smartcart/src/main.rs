//! smartcart CLI - a shopping list with AI-assisted categorization

mod cli;
mod colors;
mod commands;
mod context;
mod interaction;
mod logging;
mod output;

use std::process::ExitCode;

use smartcart_core::SmartcartError;

use cli::Commands;
use context::{AppContext, OutputOptions};

fn main() -> ExitCode {
    let cli = cli::parse();
    logging::init_logging(cli.verbose, cli.quiet || cli.json);

    let output = OutputOptions {
        json: cli.json,
        quiet: cli.quiet,
    };

    let Some(command) = cli.command else {
        // No subcommand - print version info
        if !cli.quiet {
            println!("smartcart v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
        }
        return ExitCode::SUCCESS;
    };
    let command_name = command.name();

    let result = match command {
        Commands::Init { force } => commands::run_init(force, output),
        command => AppContext::load(cli.lang.as_deref(), output)
            .and_then(|mut ctx| dispatch(&mut ctx, command)),
    };

    match result {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            output::print_error(command_name, &e, cli.json);
            let code = e
                .downcast_ref::<SmartcartError>()
                .map(SmartcartError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code as u8)
        }
    }
}

fn dispatch(ctx: &mut AppContext, command: Commands) -> anyhow::Result<i32> {
    match command {
        Commands::Init { force } => commands::run_init(force, ctx.output),
        Commands::Add { name, category } => commands::run_add(ctx, &name, category),
        Commands::SmartAdd { text } => commands::run_smart_add(ctx, &text),
        Commands::AutoSort => commands::run_auto_sort(ctx),
        Commands::List => commands::run_list(ctx),
        Commands::Toggle { id } => commands::run_toggle(ctx, &id),
        Commands::Remove { id } => commands::run_remove(ctx, &id),
        Commands::Clear { yes } => commands::run_clear(ctx, yes),
        Commands::ClearCompleted { yes } => commands::run_clear_completed(ctx, yes),
        Commands::Stats => commands::run_stats(ctx),
        Commands::Categories => commands::run_categories(ctx),
    }
}
