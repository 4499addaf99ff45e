//! Config command handlers.

use queuescope_config::{self as config, Config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = global.config.clone().unwrap_or_else(config::config_path);

    match args.command {
        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }
            config::save_config_to(&Config::default(), &path)?;
            if !global.quiet {
                let color = output::should_color(global.color);
                eprintln!("{}", output::status("Created", &path.display().to_string(), color));
            }
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = if path.exists() {
                config::load_config_from(&path)?
            } else {
                Config::default()
            };
            let rendered = toml::to_string_pretty(&cfg).map_err(config::ConfigError::from)?;
            output::print_output(rendered.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }
    }
}
