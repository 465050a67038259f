//! CLI entry point for mdx-blog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mdx-blog")]
#[command(version)]
#[command(about = "Index and inspect the posts of a Markdown/MDX blog", long_about = None)]
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
    /// List site information
    #[command(alias = "ls")]
    List {
        /// Type of content to list (post, file, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Print the post index as JSON
    Index {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Show a single post
    Show {
        /// Slug of the post
        slug: String,

        /// Render the body to HTML
        #[arg(long)]
        html: bool,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// File name for the new post
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "mdx_blog=debug,info"
    } else {
        "mdx_blog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::List { r#type } => {
            let blog = mdx_blog::Blog::new(&base_dir)?;
            mdx_blog::commands::list::run(&blog, &r#type)?;
        }

        Commands::Index { output, pretty } => {
            let blog = mdx_blog::Blog::new(&base_dir)?;
            mdx_blog::commands::index::run(&blog, output.as_deref(), pretty)?;
        }

        Commands::Show { slug, html } => {
            let blog = mdx_blog::Blog::new(&base_dir)?;
            mdx_blog::commands::show::run(&blog, &slug, html)?;
        }

        Commands::New { title, path } => {
            let blog = mdx_blog::Blog::new(&base_dir)?;
            let path = blog.new_post(&title, path.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::Version => {
            println!("mdx-blog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
