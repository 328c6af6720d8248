#![no_main]

use launcher_obfuscator::config::ObfuscatorConfig;
use launcher_obfuscator::scanner::scan;
use launcher_obfuscator::LauncherObfuscator;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    if input.len() > 100_000 {
        return;
    }

    // spans must tile the input exactly
    let rebuilt: String = scan(&input).iter().map(|t| t.text(&input)).collect();
    assert_eq!(rebuilt, input);

    let config = ObfuscatorConfig {
        identifier_length: 8,
        ..Default::default()
    };
    if let Ok(mut obfuscator) = LauncherObfuscator::new(&config) {
        let _ = obfuscator.obfuscate_source(&input);
    }
});
