//! Tests for the man pages generated by the build script.

use std::fs;
use std::path::PathBuf;

use clap::CommandFactory;
use rotativo_cli::Cli;

fn man_page(name: &str) -> String {
    let path = PathBuf::from(env!("OUT_DIR"))
        .join("man")
        .join(format!("{name}.1"));
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("missing {}: {e}", path.display()))
}

#[test]
fn test_every_subcommand_has_a_page() {
    let top = man_page("rotativo");

    for sub in Cli::command().get_subcommands() {
        let name = sub.get_name();
        assert!(top.contains(name), "rotativo.1 does not list {name}");
        man_page(&format!("rotativo-{name}"));
    }
}

#[test]
fn test_subcommand_pages_document_arguments() {
    let cases = [
        ("validate", "Validate every tenant in the config directory"),
        ("list", "table"),
        ("show", "yaml"),
        ("price", "MINUTES"),
        ("price", "CODE"),
        ("products", "CODE"),
        ("payment", "METHOD"),
        ("completions", "powershell"),
    ];

    for (sub, expected) in cases {
        let page = man_page(&format!("rotativo-{sub}"));
        assert!(
            page.contains(expected),
            "rotativo-{sub}.1 does not mention {expected}"
        );
    }
}
