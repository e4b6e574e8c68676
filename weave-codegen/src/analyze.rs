//! Shape analysis of a lowered command tree.

use std::collections::BTreeMap;

use weave_ir::{Cli, CommandTree, FeatureConfig, FeatureRequirements, ValueType};

/// Commands with more parameters than this are treated as complex.
const MAX_SIMPLE_ARGS: usize = 3;
const MAX_SIMPLE_OPTIONS: usize = 4;

/// Compute what the generated CLI needs from its tree and features.
pub fn requirements(cli: &Cli, features: &BTreeMap<String, FeatureConfig>) -> FeatureRequirements {
    let commands = cli.walk();

    FeatureRequirements {
        command_count: commands.len(),
        leaf_count: commands.iter().filter(|c| c.is_leaf()).count(),
        max_depth: cli.max_depth(),
        subcommand_nesting: commands.iter().any(|c| c.has_subcommands()),
        complex_parsing: commands.iter().any(|c| is_complex(c)),
        file_operations: cli.options.iter().any(|o| o.ty == ValueType::Path)
            || commands
                .iter()
                .any(|c| c.parameters.iter().any(|p| p.ty == ValueType::Path)),
        interactive_mode: features
            .get("interactive_mode")
            .is_some_and(FeatureConfig::is_enabled),
        global_options: !cli.options.is_empty(),
    }
}

fn is_complex(command: &CommandTree) -> bool {
    command.args.len() > MAX_SIMPLE_ARGS
        || command.options.len() > MAX_SIMPLE_OPTIONS
        || command.args.iter().any(|a| a.multiple || a.choices.is_some())
        || command
            .options
            .iter()
            .any(|o| o.multiple || o.choices.is_some())
}
