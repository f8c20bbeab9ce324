//! Terminal output.
//!
//! Standard output carries only results (the new tag name, or the preview
//! summary) so it can be captured by scripts. Errors and notices go to
//! standard error.

use console::style;

use crate::domain::Version;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold().for_stderr(), message);
}

/// Build the preview summary.
///
/// The dirty-tree line is informational and only appears when the tree
/// is not clean.
pub fn format_preview(old_version: &Version, new_version: &Version, clean: bool) -> String {
    let mut out = String::new();
    if !clean {
        out.push_str("git repo isn't clean\n");
    }
    out.push_str(&format!("current version: {}\n", old_version.tag_name()));
    out.push_str(&format!("    new version: {}\n", new_version.tag_name()));
    out
}

/// Print the preview summary to standard output.
pub fn display_preview(old_version: &Version, new_version: &Version, clean: bool) {
    print!("{}", format_preview(old_version, new_version, clean));
}

/// Print the committed version's tag name to standard output.
pub fn display_committed(tag_name: &str) {
    println!("{}", tag_name);
}
