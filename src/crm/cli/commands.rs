//! # CLI Layer
//!
//! The terminal is one client of crm, not the application. This is the only
//! code that:
//! - parses shell arguments
//! - reads from or writes to the terminal
//! - installs the log subscriber
//!
//! Each `handle_*` function drives the [`Controller`] exactly as a form-based
//! UI would (begin an edit, submit, request then confirm a delete) and then
//! prints whatever the [`TerminalView`] buffered. Mutating commands print
//! their messages followed by the re-rendered list.

use super::render::{render_config, TerminalView};
use super::setup::{
    command_name, print_grouped_help, print_help_for_command, Cli, Commands, CoreCommands,
    DataCommands, FieldArgs, MiscCommands, RecordCommands, ThemeAction,
};
use clap::Parser;
use console::Term;
use crm::commands::config::ConfigAction;
use crm::commands::{self, export, import, CmdMessage};
use crm::controller::Controller;
use crm::error::Result;
use crm::init::initialize;
use crm::model::{Customer, CustomerId, Theme};
use crm::store::fs::FileStore;
use crm::store::{KeyValueStore, DATA_KEY};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

type CliController = Controller<FileStore, TerminalView>;

struct AppContext {
    controller: CliController,
    data_dir: PathBuf,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.help {
        match &cli.command {
            Some(command) => print_help_for_command(command_name(command)),
            None => print_grouped_help(),
        }
        return Ok(());
    }

    if let Some(Commands::Misc(MiscCommands::Help { command })) = &cli.command {
        match command {
            Some(name) => print_help_for_command(name),
            None => print_grouped_help(),
        }
        return Ok(());
    }

    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        None => handle_list(&mut ctx, None, None),
        Some(Commands::Core(cmd)) => match cmd {
            CoreCommands::List { search, status } => handle_list(&mut ctx, search, status),
            CoreCommands::Search { term } => handle_list(&mut ctx, Some(term), None),
            CoreCommands::Add { name, fields } => handle_add(&mut ctx, name, fields),
        },
        Some(Commands::Record(cmd)) => match cmd {
            RecordCommands::Edit { id, name, fields } => handle_edit(&mut ctx, id, name, fields),
            RecordCommands::Delete { id, yes } => handle_delete(&mut ctx, id, yes),
        },
        Some(Commands::Data(cmd)) => match cmd {
            DataCommands::Import { path } => handle_import(&mut ctx, path),
            DataCommands::Export { path } => handle_export(&mut ctx, path),
        },
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Theme { action } => handle_theme(&mut ctx, action),
            MiscCommands::Config { key, value } => handle_config(&mut ctx, key, value),
            MiscCommands::Help { .. } => Ok(()),
        },
    }
}

/// Logs go to stderr. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "crm=debug" } else { "crm=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let ctx = initialize(cli.data_dir.as_deref())?;
    let use_color = console::colors_enabled();
    let view = TerminalView::new(ctx.config.clone(), use_color);

    let mut controller = Controller::new(ctx.store, view, ctx.config);
    controller.start()?;

    Ok(AppContext {
        controller,
        data_dir: ctx.data_dir,
    })
}

fn handle_list(ctx: &mut AppContext, search: Option<String>, status: Option<String>) -> Result<()> {
    if let Some(term) = search {
        ctx.controller.set_search(term)?;
    }
    if status.is_some() {
        ctx.controller.set_status_filter(status)?;
    }
    ctx.controller.view_mut().print(true);
    Ok(())
}

fn handle_add(ctx: &mut AppContext, name: String, fields: FieldArgs) -> Result<()> {
    ctx.controller.submit(fields.into_fields(name))?;
    ctx.controller.view_mut().print(true);
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    id: CustomerId,
    name: Option<String>,
    fields: FieldArgs,
) -> Result<()> {
    let Some(mut customer) = ctx.controller.begin_edit(id)? else {
        return warn_unknown(ctx, id);
    };

    customer.apply(fields.into_update(name));
    ctx.controller.submit(customer.fields())?;
    ctx.controller.view_mut().print(true);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: CustomerId, yes: bool) -> Result<()> {
    let Some(customer) = ctx.controller.request_delete(id) else {
        return warn_unknown(ctx, id);
    };

    if yes {
        ctx.controller.confirm_delete()?;
        ctx.controller.view_mut().print(true);
        return Ok(());
    }

    if !std::io::stdin().is_terminal() {
        ctx.controller.cancel_delete();
        ctx.controller.view_mut().push_message(CmdMessage::warning(format!(
            "Not deleted: {} (use --yes to confirm)",
            customer.customer_name
        )));
        ctx.controller.view_mut().print(false);
        return Ok(());
    }

    if prompt_delete(&customer)? {
        ctx.controller.confirm_delete()?;
        ctx.controller.view_mut().print(true);
    } else {
        ctx.controller.cancel_delete();
        ctx.controller
            .view_mut()
            .push_message(CmdMessage::info("Delete cancelled"));
        ctx.controller.view_mut().print(false);
    }
    Ok(())
}

fn prompt_delete(customer: &Customer) -> Result<bool> {
    let term = Term::stderr();
    term.write_str(&format!(
        "Delete customer information for {}? [y/N] ",
        customer.customer_name
    ))?;
    let answer = term.read_line()?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn handle_import(ctx: &mut AppContext, path: PathBuf) -> Result<()> {
    let raw = import::read_file(&path)?;
    ctx.controller.import(&raw)?;
    ctx.controller.view_mut().print(true);
    Ok(())
}

fn handle_export(ctx: &mut AppContext, path: Option<PathBuf>) -> Result<()> {
    let target = path.map(|p| p.display().to_string());
    let exported = ctx.controller.export(target.as_deref())?;
    export::write_file(&exported, Path::new(&exported.filename))?;
    ctx.controller.view_mut().print(false);
    Ok(())
}

fn handle_theme(ctx: &mut AppContext, action: Option<ThemeAction>) -> Result<()> {
    match action {
        None => {
            let result = commands::theme::show(ctx.controller.store())?;
            for message in result.messages {
                ctx.controller.view_mut().push_message(message);
            }
        }
        Some(ThemeAction::Toggle) => ctx.controller.toggle_theme()?,
        Some(ThemeAction::Light) => ctx.controller.set_theme(Theme::Light)?,
        Some(ThemeAction::Dark) => ctx.controller.set_theme(Theme::Dark)?,
    }
    ctx.controller.view_mut().print(false);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = commands::config::run(&ctx.data_dir, action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
        if let Some(path) = ctx.controller.store().backend().location(DATA_KEY) {
            println!("data-file = {}", path.display());
        }
    }
    for message in result.messages {
        ctx.controller.view_mut().push_message(message);
    }
    ctx.controller.view_mut().print(false);
    Ok(())
}

fn warn_unknown(ctx: &mut AppContext, id: CustomerId) -> Result<()> {
    ctx.controller
        .view_mut()
        .push_message(CmdMessage::warning(format!("No customer #{}", id)));
    ctx.controller.view_mut().print(false);
    Ok(())
}
