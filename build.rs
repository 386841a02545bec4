/// Build script for sortscope
/// Embeds build metadata shown by `sortscope version`

fn main() {
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-changed=Cargo.lock");

    if let Ok(version) = std::env::var("CARGO_PKG_VERSION") {
        println!("cargo:rustc-env=SORTSCOPE_VERSION={version}");
    }

    // Git hash is optional; builds from a tarball simply omit it
    let hash = std::process::Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|hash| hash.trim().to_string())
        .unwrap_or_default();
    println!("cargo:rustc-env=SORTSCOPE_GIT_HASH={hash}");
}
