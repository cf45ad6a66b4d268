//! Build script for slot-server
//!
//! Makes sure the dist/ folder exists for rust-embed. The client itself is
//! built separately with `trunk build --release` in crates/slot-client.

use std::env;
use std::path::Path;

fn main() {
    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        return;
    };
    let dist_dir = Path::new(&manifest_dir).join("../../dist");

    println!("cargo:rerun-if-changed={}", dist_dir.display());

    if !dist_dir.join("index.html").exists() {
        println!("cargo:warning=dist/index.html not found, embedding a placeholder page");
        println!("cargo:warning=Run `trunk build --release` in crates/slot-client to embed the client");
        std::fs::create_dir_all(&dist_dir).ok();
        std::fs::write(
            dist_dir.join("index.html"),
            "<!DOCTYPE html><html><body><p>slot-client has not been built.</p></body></html>",
        )
        .ok();
    }
}
