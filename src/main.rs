mod commands;
mod context;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "daymark")]
#[command(about = "Mark calendar days with colored tags and browse national holidays")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in as an identity (email); prompts when omitted
    Login {
        identity: Option<String>,
    },
    /// Log out and return to an empty anonymous session
    Logout,
    /// Show which identity is active
    Whoami,
    /// Manage color tags
    Tag {
        #[command(subcommand)]
        command: TagCommands,
    },
    /// Mark a day with a tag
    Mark {
        /// Day to mark (YYYY-MM-DD, or "today")
        date: String,
        /// Tag name or id
        tag: String,

        /// Attach a note to the mark
        #[arg(short, long)]
        note: Option<String>,
    },
    /// Remove one mark, or every mark on a day
    Unmark {
        /// Day to unmark (YYYY-MM-DD, or "today")
        date: String,
        /// Tag name or id; omit to clear the whole day
        tag: Option<String>,
    },
    /// Set or clear the note on an existing mark
    Note {
        /// Day of the mark (YYYY-MM-DD, or "today")
        date: String,
        /// Tag name or id
        tag: String,
        /// New note text; omit to clear
        text: Option<String>,
    },
    /// Show a month grid with marks and holidays
    Show {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// List national holidays for a year
    Holidays {
        /// Year to fetch, defaults to the current year
        year: Option<i32>,
    },
    /// Mark totals per tag
    Stats,
    /// Marks from the last N days
    Recent {
        #[arg(long, default_value_t = 7)]
        days: i64,
    },
}

#[derive(Subcommand)]
enum TagCommands {
    /// Create a tag from a name and a color (preset name or #rrggbb)
    Add { name: String, color: String },
    /// List tags, ordered by name
    List,
    /// Rename or recolor a tag
    Update {
        /// Tag name or id
        tag: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a tag and every mark made with it
    Rm {
        /// Tag name or id
        tag: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = context::load_config()?;
    let mut daymark = context::open(&config)?;

    match cli.command {
        Commands::Login { identity } => commands::session::login(&mut daymark, identity),
        Commands::Logout => commands::session::logout(&mut daymark),
        Commands::Whoami => commands::session::whoami(&daymark),
        Commands::Tag { command } => match command {
            TagCommands::Add { name, color } => commands::tag::add(&mut daymark, &name, &color),
            TagCommands::List => commands::tag::list(&daymark),
            TagCommands::Update { tag, name, color } => {
                commands::tag::update(&mut daymark, &tag, name, color)
            }
            TagCommands::Rm { tag } => commands::tag::rm(&mut daymark, &tag),
        },
        Commands::Mark { date, tag, note } => {
            commands::mark::add(&mut daymark, &date, &tag, note.as_deref())
        }
        Commands::Unmark { date, tag } => {
            commands::mark::remove(&mut daymark, &date, tag.as_deref())
        }
        Commands::Note { date, tag, text } => {
            commands::mark::note(&mut daymark, &date, &tag, text.as_deref())
        }
        Commands::Show { month } => commands::show::run(&mut daymark, month.as_deref()).await,
        Commands::Holidays { year } => commands::holidays::run(&mut daymark, year).await,
        Commands::Stats => commands::stats::run(&daymark),
        Commands::Recent { days } => commands::stats::recent(&daymark, days),
    }
}
