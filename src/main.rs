use colored::Colorize;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use netspec::config::{DEFAULT_ENUMERATE_LIMIT, DEFAULT_LOG_CONFIG};
use netspec::output::{classify, describe, Parsed};
use netspec::NaturalName;
use std::env;
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    init_logging()?;
    log::info!("#Start main()");

    let limit = env::var("NETSPEC_ENUMERATE_LIMIT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_ENUMERATE_LIMIT);

    let mut names = Vec::new();
    for arg in env::args().skip(1) {
        match classify(&arg) {
            Parsed::Name(name) => names.push(NaturalName::from(name)),
            parsed => {
                for line in describe(&arg, &parsed, limit) {
                    println!("{line}");
                }
            }
        }
    }

    if !names.is_empty() {
        names.sort();
        println!("{}", "names (natural order)".bold());
        for name in &names {
            println!("  {name}");
        }
    }

    log::info!("#End main()");
    Ok(())
}

fn init_logging() -> Result<(), Box<dyn Error>> {
    let path = env::var("NETSPEC_LOG_CONFIG").unwrap_or_else(|_| DEFAULT_LOG_CONFIG.to_string());
    if Path::new(&path).exists() {
        log4rs::init_file(&path, Default::default())?;
        return Ok(());
    }
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {t} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Info))?;
    log4rs::init_config(config)?;
    log::debug!("log config {path} not found, logging to stderr");
    Ok(())
}
