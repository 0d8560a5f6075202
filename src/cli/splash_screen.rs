//! The banner printed before every run: the title, what the store is, the
//! version, and the two modes the binary offers.

use colored::*;

use crate::cli::colors::COBALT_BLUE;

pub fn splash_screen() {
    show_splash_screen();
    show_version_info();
}

fn show_splash_screen() {
    print!(
        r#"
    {}
        "#,
        r"
     ██████╗ ██████╗ ██████╗  █████╗ ██╗  ████████╗
    ██╔════╝██╔═══██╗██╔══██╗██╔══██╗██║  ╚══██╔══╝
    ██║     ██║   ██║██████╔╝███████║██║     ██║
    ██║     ██║   ██║██╔══██╗██╔══██║██║     ██║
    ╚██████╗╚██████╔╝██████╔╝██║  ██║███████╗██║
     ╚═════╝ ╚═════╝ ╚═════╝ ╚═╝  ╚═╝╚══════╝╚═╝
        "
        .color(COBALT_BLUE)
    )
}

fn show_version_info() {
    println!(
        r"
    {}

    Version {}

    {}  sample users and addresses, queried and changed
    {} timed queries over random data
        ",
        env!("CARGO_PKG_DESCRIPTION").color(COBALT_BLUE),
        env!("CARGO_PKG_VERSION").color(COBALT_BLUE).italic(),
        "demo".color(COBALT_BLUE).bold(),
        "bench".color(COBALT_BLUE).bold(),
    )
}
