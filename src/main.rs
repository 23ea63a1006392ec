//! CLI entry point for blog-rs

use anyhow::Result;
use blog_rs::commands::list::ListOptions;
use blog_rs::commands::theme::ThemeAction;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blog-rs")]
#[command(author = "Yukang Chen")]
#[command(version = "0.1.0")]
#[command(about = "Markdown content pipeline for a personal blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new blog
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Tags for the post (comma separated or repeated)
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// List posts or tags
    #[command(alias = "ls")]
    List {
        /// Type of content to list (post, tag)
        #[arg(default_value = "post")]
        r#type: String,

        /// Only posts carrying this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Include posts scheduled for the future
        #[arg(short, long)]
        all: bool,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a published post
    Show {
        slug: String,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show posts related to a published post
    Related {
        slug: String,

        /// Maximum number of related posts
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the about page
    About {
        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Read or change the reader theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeCommand>,
    },

    /// Start the JSON API server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Poll the post sources for changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Display version information
    Version,
}

#[derive(Subcommand)]
enum ThemeCommand {
    /// Print the current theme
    Get,
    /// Switch to a theme (light, dark)
    Set { name: String },
    /// Flip between light and dark
    Toggle,
}

impl From<ThemeCommand> for ThemeAction {
    fn from(command: ThemeCommand) -> Self {
        match command {
            ThemeCommand::Get => ThemeAction::Get,
            ThemeCommand::Set { name } => ThemeAction::Set(name),
            ThemeCommand::Toggle => ThemeAction::Toggle,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blog_rs=debug,info"
    } else {
        "blog_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing blog in {:?}", target_dir);
            blog_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized blog in {:?}", target_dir);
        }

        Commands::New { title, tags } => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            blog_rs::commands::new::create_post(&blog, &title, &tags)?;
        }

        Commands::List {
            r#type,
            tag,
            all,
            json,
        } => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            let options = ListOptions { tag, all, json };
            blog_rs::commands::list::run(&blog, &r#type, &options).await?;
        }

        Commands::Show { slug, json } => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            blog_rs::commands::show::show(&blog, &slug, json).await?;
        }

        Commands::Related { slug, limit, json } => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            blog_rs::commands::show::related(&blog, &slug, limit, json).await?;
        }

        Commands::About { json } => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            blog_rs::commands::show::about(&blog, json).await?;
        }

        Commands::Theme { action } => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            let action = action.map(ThemeAction::from).unwrap_or(ThemeAction::Get);
            blog_rs::commands::theme::run(&blog, &action)?;
        }

        Commands::Server { port, ip, watch } => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            blog_rs::server::start(&blog, &ip, port, watch).await?;
        }

        Commands::Version => {
            println!("blog-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
