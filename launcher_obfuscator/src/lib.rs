pub mod anti_debug;
pub mod binary;
pub mod config;
pub mod deobfuscator;
pub mod encoding;
pub mod errors;
pub mod imports;
pub mod literals;
pub mod logger;
pub mod metrics;
pub mod naming;
pub mod obfuscator;
pub mod registry;
pub mod scanner;
pub mod symbols;
pub mod tool;

pub use errors::{AppError, ObfuscationError, Result};
pub use obfuscator::{LauncherObfuscator, PassStats};
