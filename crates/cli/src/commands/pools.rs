use std::path::Path;

use serde::Serialize;
use solocart_core::CategoryPools;

use crate::commands::{load_catalog, load_config, CommandResult};

const COMMAND: &str = "pools";

#[derive(Debug, Serialize)]
struct PoolReport {
    catalog_size: usize,
    pools: Vec<PoolEntry>,
}

#[derive(Debug, Serialize)]
struct PoolEntry {
    category: String,
    size: usize,
}

pub fn run(catalog_path: &Path, config_path: Option<&Path>) -> CommandResult {
    let config = match load_config(COMMAND, config_path) {
        Ok(config) => config,
        Err(result) => return *result,
    };

    let catalog = match load_catalog(COMMAND, catalog_path) {
        Ok(catalog) => catalog,
        Err(result) => return *result,
    };

    let pools = CategoryPools::build(&catalog, &config.pool);
    let report = PoolReport {
        catalog_size: catalog.len(),
        pools: pools
            .sizes()
            .into_iter()
            .map(|(category, size)| PoolEntry { category, size })
            .collect(),
    };

    CommandResult::success(COMMAND, report)
}
