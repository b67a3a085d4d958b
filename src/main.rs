fn main() -> Result<(), Box<dyn std::error::Error>> {
    sweeper_lib::run()
}
