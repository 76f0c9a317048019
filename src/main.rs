fn main() {
    #[cfg(feature = "cli")]
    jarpatch::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("jarpatch: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
