fn main() {
    // ESP-IDF link arguments are only needed for flash builds; host builds
    // (tests, simulation) compile without the toolchain sysenv.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
