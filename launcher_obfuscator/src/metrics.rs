use prometheus::{IntCounter, Registry};

use crate::binary::StripReport;
use crate::obfuscator::PassStats;

pub struct Metrics {
    pub literals_obfuscated: IntCounter,
    pub literals_skipped: IntCounter,
    pub symbols_renamed: IntCounter,
    pub anti_debug_sites: IntCounter,
    pub binary_tokens_scrubbed: IntCounter,
    pub signature_fragments_scrubbed: IntCounter,
}

impl Metrics {
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let counter = |name: &str, help: &str| -> Result<IntCounter, prometheus::Error> {
            let c = IntCounter::new(name, help)?;
            registry.register(Box::new(c.clone()))?;
            Ok(c)
        };
        Ok(Self {
            literals_obfuscated: counter("literals_obfuscated_total", "Literals replaced by accessors")?,
            literals_skipped: counter("literals_skipped_total", "Literals left untouched")?,
            symbols_renamed: counter("symbols_renamed_total", "Tagged identifiers renamed")?,
            anti_debug_sites: counter("anti_debug_sites_total", "Marker lines rewritten into probe launches")?,
            binary_tokens_scrubbed: counter("binary_tokens_scrubbed_total", "Token occurrences scrubbed from binaries")?,
            signature_fragments_scrubbed: counter(
                "signature_fragments_scrubbed_total",
                "Compression signature fragments overwritten",
            )?,
        })
    }

    pub fn record_pass(&self, stats: &PassStats) {
        self.literals_obfuscated.inc_by(stats.literals_registered as u64);
        self.literals_skipped.inc_by(stats.literals_skipped as u64);
        self.symbols_renamed.inc_by(stats.symbols_renamed as u64);
        self.anti_debug_sites.inc_by(stats.anti_debug_sites as u64);
    }

    pub fn record_strip(&self, report: &StripReport) {
        self.binary_tokens_scrubbed.inc_by(report.tokens_replaced as u64);
    }

    pub fn record_scrub(&self, fragments: usize) {
        self.signature_fragments_scrubbed.inc_by(fragments as u64);
    }
}
