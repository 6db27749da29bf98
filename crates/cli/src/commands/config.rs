use std::path::Path;

use crate::commands::{load_config, CommandResult};

const COMMAND: &str = "config";

pub fn run(path: Option<&Path>) -> CommandResult {
    match load_config(COMMAND, path) {
        Ok(config) => CommandResult::success(COMMAND, config),
        Err(result) => *result,
    }
}
