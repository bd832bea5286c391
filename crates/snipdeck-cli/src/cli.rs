use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    author = "bahdotsh",
    version = env!("CARGO_PKG_VERSION"),
    about = "snipdeck - keep text snippets in one document and pick them fast",
    long_about = "snipdeck reads snippets from a single Markdown-like document ('# Group', '## Snippet') \
                  and lets you pick one, copying its body to the clipboard."
)]
pub struct Snipdeck {
    #[clap(long, short, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[clap(subcommand)]
    pub commands: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the picker (default when no command is given)
    Pick {
        #[clap(help = "Initial search text")]
        query: Option<String>,
    },
    /// Print recently used snippets and all groups
    List,
    /// Print the body of a snippet
    Show {
        #[clap(help = "Name of the snippet")]
        name: String,

        #[clap(long, short, help = "Only look in this group")]
        group: Option<String>,
    },
    /// Copy a snippet body to the clipboard and mark it as recently used
    Copy {
        #[clap(help = "Name of the snippet")]
        name: String,

        #[clap(long, short, help = "Only look in this group")]
        group: Option<String>,
    },
    /// Show recently used snippets
    Recent {
        #[clap(long, help = "Forget recently used snippets")]
        clear: bool,
    },
    /// Edit the snippet document in $VISUAL / $EDITOR
    Edit,
    /// Replace the snippet document with the contents of a file
    Import {
        #[clap(help = "File to read the document from")]
        file: PathBuf,
    },
    /// Print the raw snippet document
    Config,
    /// Show where snippets are stored
    Path,
    /// Start the HTTP API for picker front-ends
    Serve {
        #[clap(long, short, default_value = "3000", help = "Port to listen on")]
        port: u16,
    },
}
