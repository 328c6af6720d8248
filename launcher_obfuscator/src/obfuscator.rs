use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::anti_debug::inject_anti_debug;
use crate::config::ObfuscatorConfig;
use crate::errors::Result;
use crate::literals::obfuscate_strings;
use crate::naming::NameGenerator;
use crate::registry::SecretsRegistry;
use crate::symbols::SymbolObfuscator;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PassStats {
    pub anti_debug_sites: usize,
    pub literals_registered: usize,
    pub literals_skipped: usize,
    pub call_sites: usize,
    pub symbols_renamed: usize,
}

pub struct LauncherObfuscator {
    names: NameGenerator,
    registry: SecretsRegistry,
    symbols: SymbolObfuscator,
    check_marker: String,
}

impl LauncherObfuscator {
    /// Preserved literals from `config` are registered as leave entries.
    pub fn new(config: &ObfuscatorConfig) -> Result<Self> {
        let mut registry = SecretsRegistry::new();
        for literal in &config.preserved_literals {
            registry.preserve(literal);
        }
        Ok(Self {
            names: NameGenerator::new(config.identifier_length),
            registry,
            symbols: SymbolObfuscator::new(&config.tag_prefix)?,
            check_marker: config.check_marker.clone(),
        })
    }

    pub fn registry(&self) -> &SecretsRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SecretsRegistry {
        &mut self.registry
    }

    pub fn obfuscate_source(&mut self, source: &str) -> (String, PassStats) {
        let (text, anti_debug_sites) = inject_anti_debug(source, &self.check_marker);
        let (text, literal_stats) = obfuscate_strings(&text, &mut self.registry, &self.names);
        let (text, symbols_renamed) = self.symbols.obfuscate_symbols(&text, &self.names);

        let stats = PassStats {
            anti_debug_sites,
            literals_registered: literal_stats.registered,
            literals_skipped: literal_stats.skipped,
            call_sites: literal_stats.call_sites,
            symbols_renamed,
        };
        info!(
            anti_debug_sites,
            literals = stats.literals_registered,
            skipped = stats.literals_skipped,
            symbols = symbols_renamed,
            "launcher source obfuscated"
        );
        (text, stats)
    }

    /// Obfuscates the launcher at `input` and writes it to `output`, which
    /// may be the same path.
    pub async fn obfuscate_launcher(&mut self, input: &Path, output: &Path) -> Result<PassStats> {
        let source = tokio::fs::read_to_string(input).await?;
        let (text, stats) = self.obfuscate_source(&source);
        tokio::fs::write(output, text).await?;
        Ok(stats)
    }
}
