use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cardstock")]
#[command(author, version)]
#[command(about = "Renders a restricted markdown dialect into HTML card layouts")]
#[command(
    long_about = "Cardstock renders a small, predictable markdown dialect into HTML. It \
    supports headings, paragraphs, lists, pipe tables, blockquotes with attributions, \
    images, and inline styles, and produces the same stable output for the same input \
    every time."
)]
#[command(after_help = "\
EXAMPLES:

    # Render a file to stdout
    cardstock render document.md

    # Render from stdin
    cat document.md | cardstock render

    # Write the output next to the input
    cardstock render --output document.html document.md

    # Use custom config
    cardstock render --config custom.toml document.md

    # Parse and inspect the entity tree
    cardstock parse document.md

CONFIGURATION:

Cardstock looks for configuration files in this order:
  1. Explicit --config path
  2. cardstock.toml or .cardstock.toml in current/parent directories
  3. ~/.config/cardstock/config.toml (XDG)
  4. Built-in defaults

Example .cardstock.toml:

    root_tag = \"div\"
    root_class = \"markdown\"
    collapsible_attributions = true")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true)]
    #[arg(help = "Path to configuration file")]
    #[arg(
        long_help = "Path to a custom configuration file. If not specified, cardstock will \
        search for .cardstock.toml or cardstock.toml in the current directory and its \
        parents, then fall back to ~/.config/cardstock/config.toml."
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a markdown document to HTML
    #[command(
        long_about = "Render a markdown document to HTML. By default, outputs the rendered \
        markup to stdout. Use --output to write it to a file instead."
    )]
    Render {
        /// Input file (stdin if not provided)
        #[arg(help = "Input file path")]
        file: Option<PathBuf>,

        /// Write output to a file instead of stdout
        #[arg(long, short)]
        #[arg(help = "Output file path")]
        output: Option<PathBuf>,
    },

    /// Parse a markdown document and print its entity tree
    #[command(
        long_about = "Parse a markdown document and print the resulting entity tree in \
        debug form. Useful for inspecting how a document decomposes into blocks."
    )]
    Parse {
        /// Input file (stdin if not provided)
        #[arg(help = "Input file path")]
        file: Option<PathBuf>,
    },
}
