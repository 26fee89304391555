// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: database path
fn db_path_arg() -> Arg {
    Arg::new("db_path")
        .short('d')
        .long("db-path")
        .value_name("PATH")
        .default_value("US_recipes.db")
        .help("Database path")
}

fn build_cli() -> Command {
    Command::new("cookbook")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Cookbook Contributors")
        .about("Read-only HTTP API for listing and searching recipes")
        .subcommand_required(true)
        .subcommand(
            Command::new("init")
                .about("Create the recipe database")
                .arg(db_path_arg()),
        )
        .subcommand(
            Command::new("load")
                .about("Replace the database contents with a JSON dataset")
                .arg(
                    Arg::new("json_path")
                        .required(true)
                        .help("Path to the dataset (JSON array or object of recipes)"),
                )
                .arg(db_path_arg()),
        )
        .subcommand(
            Command::new("serve")
                .about("Run the HTTP API")
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .value_name("FILE")
                        .help("TOML configuration file"),
                )
                .arg(
                    Arg::new("db_path")
                        .short('d')
                        .long("db-path")
                        .value_name("PATH")
                        .help("Database path (overrides the config file)"),
                )
                .arg(
                    Arg::new("bind")
                        .short('b')
                        .long("bind")
                        .value_name("ADDR")
                        .help("Address to bind (overrides the config file)"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory - use CARGO_MANIFEST_DIR which is always set by cargo
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("cookbook.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
