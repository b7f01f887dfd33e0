use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        if *print_config {
            let yaml = serde_yaml::to_string(cfg).map_err(|_| AppError::ConfigSave)?;
            println!("{yaml}");
        }

        if *check {
            let problems = cfg.check();
            if problems.is_empty() {
                success("Configuration looks good.");
            } else {
                for problem in problems {
                    warning(problem);
                }
            }
        }
    }
    Ok(())
}
