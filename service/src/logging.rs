use crate::config::Config;
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// HTTP stack modules that log every connection and frame below Trace.
const HTTP_STACK_MODULES: &[&str] = &["hyper", "hyper_util", "reqwest", "rustls", "h2", "mockito"];

pub struct Logger {}

impl Logger {
    /// Installs the global terminal logger at the configured level.
    ///
    /// Log lines go to stderr so command output on stdout stays pipeable.
    /// The HTTP stack is silenced unless the level is Trace.
    pub fn init_logger(config: &Config) {
        let level = config.log_level_filter;
        let log_config = Self::build_log_config(Self::ignored_modules(level));

        if let Err(e) = TermLogger::init(level, log_config, TerminalMode::Stderr, ColorChoice::Auto)
        {
            log::warn!("Logger already initialized: {e}");
        }
    }

    /// Modules whose records are dropped at the given level.
    fn ignored_modules(level: LevelFilter) -> &'static [&'static str] {
        if level == LevelFilter::Trace {
            &[]
        } else {
            HTTP_STACK_MODULES
        }
    }

    fn build_log_config(ignored: &[&'static str]) -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();
        builder.set_target_level(LevelFilter::Debug);

        for &module in ignored {
            builder.add_filter_ignore_str(module);
        }

        builder.build()
    }
}
