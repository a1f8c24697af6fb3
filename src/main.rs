use todo_app::config::AppConfig;

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_errors) = AppConfig::from_document();
    let _ = console_log::init_with_level(config.log_level);
    for e in config_errors {
        log::warn!("{}; ignoring attribute", e);
    }

    if let Err(e) = todo_app::mount(&config) {
        log::error!("Failed to start: {}", e);
    }
}
