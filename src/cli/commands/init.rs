use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;

pub fn handle(_cli: &Cli) -> AppResult<()> {
    Config::init_all()
}
