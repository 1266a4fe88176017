fn main() -> std::process::ExitCode {
    pulse::entry::run()
}
