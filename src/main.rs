use clap::{App, Arg};
use presence::build::build_site;
use presence::config::Config;
use std::path::PathBuf;
use std::process::exit;

fn main() {
    env_logger::init();

    let matches = App::new("presence")
        .version(clap::crate_version!())
        .about("Builds a personal homepage from activity feeds around the web")
        .arg(
            Arg::with_name("project")
                .short("p")
                .long("project")
                .takes_value(true)
                .help("Directory to search for site.yaml (defaults to the current directory)"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .default_value("_site")
                .help("Output directory for the generated site"),
        )
        .get_matches();

    let output_directory = PathBuf::from(matches.value_of("output").unwrap());
    let project_directory = match matches.value_of("project") {
        Some(dir) => PathBuf::from(dir),
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("Error: getting current directory: {}", e);
                exit(1);
            }
        },
    };

    let config = match Config::from_directory(&project_directory, &output_directory) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit(1);
        }
    };

    if let Err(e) = build_site(&config) {
        eprintln!("Error: {}", e);
        exit(1);
    }
}
