use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{runtime::ConfigErrors, Appender, Config, Root},
    encode::pattern::PatternEncoder,
};

const LOG_CONFIG_FILE: &str = "log4rs.yaml";

#[ctor::ctor]
fn init() {
    if log4rs::init_file(LOG_CONFIG_FILE, Default::default()).is_ok() {
        return;
    }
    // no config file in the working directory, log warnings to stderr
    let result = fallback_config()
        .map_err(|e| e.to_string())
        .and_then(|config| log4rs::init_config(config).map_err(|e| e.to_string()));
    if let Err(e) = result {
        eprintln!("Initialization of logging failed: {}", e);
    }
}

fn fallback_config() -> Result<Config, ConfigErrors> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{l} {t} - {m}{n}")))
        .build();
    Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))
}
