use std::env;
use std::process::Command;

/// Short commit hash reported by the server's `GET /`, `unknown` outside
/// of a git checkout. `WORD_FINDER_HASH` wins when set (release builds from
/// a source tarball).
fn git_hash() -> String {
    if let Ok(hash) = env::var("WORD_FINDER_HASH") {
        return hash;
    }

    Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|hash| hash.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    println!("cargo:rustc-env=GIT_HASH={}", git_hash());

    println!("cargo:rerun-if-env-changed=WORD_FINDER_HASH");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/");
}
