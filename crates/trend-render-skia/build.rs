// File: crates/trend-render-skia/build.rs
// Summary: Links the Windows system libraries Skia's prebuilt binaries expect.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // RegOpenKeyExW and friends, pulled in by Skia's font manager
        println!("cargo:rustc-link-lib=advapi32");
    }
}
