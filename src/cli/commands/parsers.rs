//! Parser listing command

use std::path::Path;

use rawtextcheck::core::ports::ParserLookup;
use rawtextcheck::output::{OutputMode, ParserInfo, ParserListResult};

use super::session;

/// List registered parsers and skipped plugin manifests
pub fn parsers(home: &Path, mode: OutputMode) -> anyhow::Result<()> {
    let bench = session::open(home);
    let registry = bench.registry();

    let parsers = registry
        .names()
        .into_iter()
        .map(|name| {
            let arguments = registry.arguments_of(&name)?;
            Ok(ParserInfo {
                origin: registry.origin(&name),
                name,
                arguments,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    ParserListResult {
        parsers,
        failures: registry.load_failures(),
    }
    .render(mode);
    Ok(())
}
