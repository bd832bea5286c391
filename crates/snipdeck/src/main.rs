fn main() {
    snipdeck_cli::run_main();
}
