mod cat_file;
mod checkout;
mod hash_object;
mod init;
mod log;
mod ls_tree;
mod show_ref;
mod tag;

use anyhow::Result;

use crate::args::Command;

/// Calls the corresponding function to perform every command variant.
///
/// # Return
///
/// The message to print, possibly empty.
///
/// # Errors
///
/// This function will fail if any of the executed commands return an error.
pub fn execute_command(command: &Command) -> Result<String> {
    match command {
        Command::Init { directory } => init::init(directory.as_deref()),
        Command::HashObject { write, kind, file } => hash_object::hash_object(*write, kind, file),
        Command::CatFile { object } => cat_file::cat_file(object),
        Command::LsTree { object } => ls_tree::ls_tree(object),
        Command::Log { commit } => log::log(commit),
        Command::Checkout { object, path } => checkout::checkout(object, path),
        Command::ShowRef => show_ref::show_ref(),
        Command::Tag { name, object } => tag::tag(name, object),
    }
}
