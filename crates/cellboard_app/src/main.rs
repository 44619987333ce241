mod platform;

fn main() -> anyhow::Result<()> {
    let config = platform::AppConfig::default();
    platform::logging::initialize(&config.log_file);
    platform::run_app(config)
}
