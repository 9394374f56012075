//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `eazybank_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("eazybank_core version={}", eazybank_core::core_version());
    println!(
        "eazybank_core default_log_level={}",
        eazybank_core::default_log_level()
    );
}
