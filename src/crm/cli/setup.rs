use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use crm::model::{CustomerFields, CustomerUpdate};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "crm",
    bin_name = "crm",
    version,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Keep track of customers from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use this directory for data and config
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Core,
    Record,
    Data,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Core => "Core Commands:",
            CommandGroup::Record => "Per-Customer Commands:",
            CommandGroup::Data => "Data Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "list" | "search" | "add" => Some(CommandGroup::Core),
            "edit" | "delete" => Some(CommandGroup::Record),
            "import" | "export" => Some(CommandGroup::Data),
            "theme" | "config" | "help" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::Core,
            CommandGroup::Record,
            CommandGroup::Data,
            CommandGroup::Misc,
        ]
    }
}

/// Top-level help, with subcommands listed by group.
pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("crm {version}\n"));
    output.push_str("Keep track of customers from the terminal\n");
    output.push('\n');
    output.push_str("Usage: crm [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("      --data-dir <DIR>  Use this directory for data and config\n");
    output.push_str("  -v, --verbose         Verbose output\n");
    output.push_str("  -h, --help            Print help\n");
    output.push_str("  -V, --version         Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints clap's help for one subcommand, or the grouped help when it is unknown.
pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();

    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name || subcmd.get_all_aliases().any(|a| a == name) {
            print!("{}", subcmd.render_help());
            return;
        }
    }

    eprintln!("Unknown command: {}", name);
    eprintln!();
    print_grouped_help();
}

pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Core(CoreCommands::List { .. }) => "list",
        Commands::Core(CoreCommands::Search { .. }) => "search",
        Commands::Core(CoreCommands::Add { .. }) => "add",
        Commands::Record(RecordCommands::Edit { .. }) => "edit",
        Commands::Record(RecordCommands::Delete { .. }) => "delete",
        Commands::Data(DataCommands::Import { .. }) => "import",
        Commands::Data(DataCommands::Export { .. }) => "export",
        Commands::Misc(MiscCommands::Theme { .. }) => "theme",
        Commands::Misc(MiscCommands::Config { .. }) => "config",
        Commands::Misc(MiscCommands::Help { .. }) => "help",
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Core(CoreCommands),

    #[command(flatten)]
    Record(RecordCommands),

    #[command(flatten)]
    Data(DataCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum CoreCommands {
    /// List customers
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Match name, company or email (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Only show customers with this status
        #[arg(long)]
        status: Option<String>,
    },

    /// Search customers by name, company or email
    #[command(display_order = 2)]
    Search { term: String },

    /// Add a customer
    #[command(alias = "n", display_order = 3)]
    Add {
        /// Customer name
        name: String,

        #[command(flatten)]
        fields: FieldArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum RecordCommands {
    /// Change fields of a customer
    #[command(alias = "e", display_order = 10)]
    Edit {
        /// Customer number as shown by `list`
        id: u64,

        /// New customer name
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete a customer
    #[command(alias = "rm", display_order = 11)]
    Delete {
        /// Customer number as shown by `list`
        id: u64,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Replace all customers with the contents of a file
    #[command(display_order = 20)]
    Import { path: PathBuf },

    /// Write all customers to a file
    #[command(display_order = 21)]
    Export {
        /// Output path (defaults to the configured export filename)
        path: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Show or change the colour theme
    #[command(display_order = 30)]
    Theme {
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },

    /// Get or set configuration
    #[command(display_order = 31)]
    Config {
        /// Configuration key (e.g., default-status)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Print help for crm or a subcommand
    #[command(display_order = 32)]
    Help {
        /// Subcommand to get help for
        command: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeAction {
    Light,
    Dark,
    Toggle,
}

/// Optional customer fields shared by `add` and `edit`.
#[derive(Args, Debug, Default)]
pub struct FieldArgs {
    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub assignee: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

impl FieldArgs {
    /// A complete form for `add`. Missing fields are empty.
    pub fn into_fields(self, name: String) -> CustomerFields {
        CustomerFields {
            customer_name: name,
            company_name: self.company.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            assignee: self.assignee.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
        }
    }

    /// A partial edit for `edit`. Missing fields are left alone.
    pub fn into_update(self, name: Option<String>) -> CustomerUpdate {
        CustomerUpdate {
            customer_name: name,
            company_name: self.company,
            email: self.email,
            phone: self.phone,
            status: self.status,
            assignee: self.assignee,
            notes: self.notes,
        }
    }
}
