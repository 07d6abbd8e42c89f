fn main() {
    println!("cargo:rerun-if-env-changed=WINDOW_CONFIG_JSON");

    // Host builds (tests, fuzzing) have no ESP-IDF toolchain to locate.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
