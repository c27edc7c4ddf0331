use cargo_lock::Lockfile;
use serde::Serialize;
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

#[derive(Serialize)]
struct DepInfo {
    name: String,
    version: String,
    checksum: Option<String>,
    source: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Get Git Hash
    let output = Command::new("git").args(["rev-parse", "HEAD"]).output();
    let git_hash = match output {
        Ok(o) if o.status.success() => String::from_utf8_lossy(&o.stdout).trim().to_string(),
        _ => "unknown".to_string(),
    };
    println!("cargo:rustc-env=SUNCALC_GIT_HASH={}", git_hash);
    println!("cargo:rerun-if-changed=.git/HEAD");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR")?;
    let lock_path = Path::new(&manifest_dir).join("Cargo.lock");

    // Parse the lock file, rerun this build script if Cargo.lock changes
    println!("cargo:rerun-if-changed=Cargo.lock");
    let deps: Vec<DepInfo> = match Lockfile::load(&lock_path) {
        Ok(lockfile) => lockfile
            .packages
            .into_iter()
            .map(|pkg| DepInfo {
                name: pkg.name.as_str().to_string(),
                version: pkg.version.to_string(),
                checksum: pkg.checksum.map(|c| c.to_string()),
                source: pkg.source.map(|s| s.to_string()),
            })
            .collect(),
        // Built as a dependency, the lock file lives in the parent workspace
        Err(e) => {
            println!("cargo:warning=No dependency list from {}: {}", lock_path.display(), e);
            Vec::new()
        }
    };
    let json_info = serde_json::to_string(&deps)?;

    let out_dir = env::var("OUT_DIR")?;
    let dest_path = Path::new(&out_dir).join("deps_info.json");
    fs::write(&dest_path, json_info)?;
    println!("cargo:rustc-env=SUNCALC_DEPS_PATH={}", dest_path.display());
    Ok(())
}
