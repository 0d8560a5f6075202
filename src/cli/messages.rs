//! Message formatting for the `cobalt` command line.
//!
//! Every line the binary prints goes through [`system_message`], tagged
//! with the part of the run it comes from. Query results get a header with
//! their row count, and bulk changes report how many rows they touched.

use colored::Colorize;

use crate::cli::colors::{COBALT_BLUE, ROW_GREY};

pub fn highlight_argument(argument: &str) -> String {
    format!("{}", argument.color(COBALT_BLUE))
}

pub fn system_message(source_name: &str, message: String) -> String {
    //! Tag `message` with its source, like `[bench ] ...`.
    //!
    //! The source is padded so consecutive messages line up.

    let source_formatted = format!("{:6}", source_name.color(COBALT_BLUE).bold());

    format!("[{}] {}", source_formatted, message)
}

pub fn query_header(title: &str, n_rows: usize) -> String {
    system_message(
        "query",
        format!("{} ({} {})", highlight_argument(title), n_rows, rows_word(n_rows)),
    )
}

pub fn rows_affected(action: &str, n_rows: usize, target: &str) -> String {
    //! Report a bulk change, e.g. "deleted 1 row of users named c".

    system_message(
        "cobalt",
        format!(
            "{} {} {} of {}",
            action,
            n_rows.to_string().bold(),
            rows_word(n_rows),
            highlight_argument(target)
        ),
    )
}

pub fn row_line(row: &dyn std::fmt::Display) -> String {
    format!("  {} {}", "|".color(ROW_GREY), row)
}

fn rows_word(n_rows: usize) -> &'static str {
    if n_rows == 1 { "row" } else { "rows" }
}
