use clap::{Parser, Subcommand};

/// Command-line interface definition for pdrota
/// CLI application to upload on-call rotations to PagerDuty from CSV files
#[derive(Parser)]
#[command(
    name = "pdrota",
    version = env!("CARGO_PKG_VERSION"),
    about = "Upload on-call rotations to PagerDuty from CSV files",
    long_about = None
)]
pub struct Cli {
    /// Override configuration file path (useful for tests or custom setups)
    #[arg(global = true, long = "config")]
    pub config: Option<String>,

    /// PagerDuty API token (overrides config file and environment)
    #[arg(global = true, long = "token")]
    pub token: Option<String>,

    /// IANA timezone used to interpret CSV timestamps (overrides config)
    #[arg(global = true, long = "timezone")]
    pub timezone: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the default configuration file
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Upload shift overrides from a CSV file
    ///
    /// The file needs a header row with the configured column names
    /// (default: attendee,start,end,schedule). Timestamps are interpreted
    /// in the configured timezone and converted to UTC. Attendees that
    /// look like email addresses are resolved through the users API,
    /// anything else is sent as a PagerDuty user id.
    Upload {
        /// Path of the CSV file to upload
        file: String,

        /// Build every request but submit nothing
        #[arg(long = "dry-run")]
        dry_run: bool,
    },

    /// Generate and create (or update) a weekly schedule from a CSV file
    ///
    /// The file needs a header row `attendee,weekday,start,end`, one row
    /// per recurring weekly shift (times are HH:MM within the day). Users
    /// are fetched from PagerDuty and matched by email; users without rows
    /// get the default availability window given by --day/--start-hour/
    /// --end-hour.
    Schedule {
        /// Path of the weekly-shift CSV file
        file: String,

        /// Name of the schedule (also the create-or-update key)
        #[arg(long)]
        name: String,

        /// Description stored on the schedule
        #[arg(long)]
        description: Option<String>,

        /// Default availability day, repeatable (monday..sunday)
        #[arg(long = "day", value_name = "DAY")]
        days: Vec<String>,

        /// First hour of the default availability window (0-23)
        #[arg(long = "start-hour", value_name = "H", default_value_t = 0)]
        start_hour: u8,

        /// Last hour of the default availability window (0-23)
        #[arg(long = "end-hour", value_name = "H", default_value_t = 23)]
        end_hour: u8,

        /// PagerDuty user id to leave out of the schedule, repeatable
        #[arg(long = "exclude", value_name = "USER_ID")]
        exclude: Vec<String>,

        /// Print the generated schedule as JSON instead of submitting it
        #[arg(long = "dry-run")]
        dry_run: bool,
    },

    /// List PagerDuty users
    Users {
        /// Filter users by name or email
        #[arg(long)]
        query: Option<String>,
    },
}
