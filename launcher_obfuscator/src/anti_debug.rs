use rand::seq::SliceRandom;
use rand::Rng;

/// Probe invocations available to the launcher template.
pub const CHECK_ROUTINES: [&str; 8] = [
    "obDependencyCheck()",
    "obEnvArgsDetect()",
    "obParentTracerDetect()",
    "obParentCmdLineDetect()",
    "obEnvDetect()",
    "obEnvParentDetect()",
    "obLdPreloadDetect()",
    "obParentDetect()",
];

pub const DEFAULT_MARKER: &str = "// OB_CHECK";

/// One detached `go` launch per routine, in a random order.
pub fn launch_line<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut routines = CHECK_ROUTINES;
    routines.shuffle(rng);
    routines.iter().map(|r| format!("go {r};")).collect()
}

/// Replaces every line containing `marker` with a shuffled launch line,
/// keeping the line's indentation. Returns the text and the number of
/// marker lines rewritten.
pub fn inject_anti_debug(source: &str, marker: &str) -> (String, usize) {
    let mut rng = rand::rng();
    let mut sites = 0;
    let mut out = String::with_capacity(source.len() + 512);

    for line in source.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        if !content.contains(marker) {
            out.push_str(line);
            continue;
        }
        let indent = &content[..content.len() - content.trim_start().len()];
        out.push_str(indent);
        out.push_str(&launch_line(&mut rng));
        out.push_str(&line[content.len()..]);
        sites += 1;
    }
    (out, sites)
}
