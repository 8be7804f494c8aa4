use std::env;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=DIGIT_CLASSIFIER_MODEL_DIR");

    if env::var_os("CARGO_FEATURE_FFI").is_none() {
        println!("cargo:info=FFI feature not enabled, model entry point will not be linked");
        return;
    }

    println!("cargo:info=FFI feature enabled, looking for the compiled model...");

    if let Ok(model_dir) = env::var("DIGIT_CLASSIFIER_MODEL_DIR") {
        println!("cargo:info=Using model directory from DIGIT_CLASSIFIER_MODEL_DIR: {model_dir}");
        println!("cargo:rustc-link-search=native={model_dir}");
        println!("cargo:rustc-link-lib=static=model");
        return;
    }

    let lib_dir = Path::new("lib");
    if lib_dir.exists() {
        println!("cargo:rustc-link-search=native=lib");
        println!("cargo:rustc-link-lib=static=model");
        println!("cargo:rerun-if-changed=lib");
    } else {
        println!("cargo:warning=lib/ directory not found and DIGIT_CLASSIFIER_MODEL_DIR is unset.");
        println!("cargo:warning=The `entry` symbol must be provided by the final link.");
    }
}
