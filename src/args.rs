use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Contains the commands passed to the program
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

/// A list of subcommands the program can perform
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Creates a new repository
    Init {
        /// Directory to create the repository in, defaults to the current one
        directory: Option<PathBuf>,
    },

    /// Computes the hash of a file as an object of the given type
    HashObject {
        /// Also write the object to the repository
        #[arg(short, long)]
        write: bool,
        /// Object type: blob, tree, commit or tag
        kind: String,
        /// File with the object payload
        file: PathBuf,
    },

    /// Shows the object with the specified hash or ref
    CatFile {
        /// Hash or ref name of the object to show
        object: String,
    },

    /// Lists the leaves of a tree
    LsTree {
        /// Hash or ref name of the tree
        object: String,
    },

    /// Prints the ancestry of a commit as a graphviz document
    Log {
        /// Hash or ref name of the commit
        commit: String,
    },

    /// Writes the files of a commit or tree into a directory
    Checkout {
        /// Hash or ref name of a commit or tree
        object: String,
        /// Destination directory, created if missing
        path: PathBuf,
    },

    /// Lists every ref with the value it holds
    ShowRef,

    /// Creates a lightweight tag pointing to an object
    Tag {
        /// Tag name
        name: String,
        /// Hash or ref name the tag points to
        object: String,
    },
}
