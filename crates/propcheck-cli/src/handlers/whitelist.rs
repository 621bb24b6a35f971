//! Whitelist command handler

use crate::config::CliConfig;
use crate::output::Printer;
use crate::WhitelistArgs;
use propcheck::{Whitelist, WhitelistCategory};

/// Execute the whitelist command
pub fn execute_whitelist(config: &CliConfig, args: &WhitelistArgs) {
    let printer = Printer::new(config.color.should_color(), config.verbosity.is_quiet());
    for (category, patterns) in list_whitelist(args.category) {
        printer.header(category.name());
        for pattern in patterns {
            printer.line(&pattern);
        }
    }
}

/// Built-in patterns grouped by category. `None` lists every concrete
/// category; `All` is listed as a single merged group.
#[must_use]
pub fn list_whitelist(category: Option<WhitelistCategory>) -> Vec<(WhitelistCategory, Vec<String>)> {
    let categories = match category {
        Some(category) => vec![category],
        None => WhitelistCategory::BUILT_IN.to_vec(),
    };
    categories
        .into_iter()
        .map(|category| {
            let patterns = Whitelist::builtin()
                .category(category)
                .iter()
                .map(ToString::to_string)
                .collect();
            (category, patterns)
        })
        .collect()
}
