mod signature;
mod strip;

pub use signature::{
    random_replacement, sed_args, sed_escape, sed_expression, SED_SLURP, UPX_SIGNATURE,
};
pub use strip::{
    capitalize_first, removal_set, scrub_tokens, strip_args, StripReport, INTERNAL_TOKENS,
    REMOVED_SECTIONS, STRIP_FLAGS,
};

use crate::config::ObfuscatorConfig;
use crate::naming::NameGenerator;
use crate::tool::ToolRunner;

/// Runs the strip and signature passes through a [`ToolRunner`].
pub struct BinaryScrubber {
    runner: Box<dyn ToolRunner>,
    strip_tool: String,
    sed_tool: String,
    retries: u32,
    names: NameGenerator,
}

impl BinaryScrubber {
    pub fn new(runner: Box<dyn ToolRunner>, config: &ObfuscatorConfig) -> Self {
        Self {
            runner,
            strip_tool: config.strip_tool.clone(),
            sed_tool: config.sed_tool.clone(),
            retries: config.tool_retries,
            names: NameGenerator::new(config.identifier_length),
        }
    }
}
