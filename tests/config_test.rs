use workq_rs::config::Config;

// Single test: phases share REDIS_URL, and parallel tests would race on it.
#[test]
fn config_from_env_lifecycle() {
    // Missing required var fails fast
    unsafe {
        std::env::remove_var("REDIS_URL");
        std::env::remove_var("WORKQ_QUEUE_KEY");
        std::env::remove_var("WORKQ_IN_PROCESSING_KEY");
    }
    assert!(Config::from_env().is_err());

    // Required var present: defaults fill in the rest
    unsafe {
        std::env::set_var("REDIS_URL", "redis://localhost:6379");
    }
    let config = Config::from_env().unwrap();
    assert_eq!(config.queue_key, "workq:pending");
    assert_eq!(config.in_processing_key, "workq:in_processing");
    assert_eq!(config.log_level, "info");

    // Overrides are picked up
    unsafe {
        std::env::set_var("WORKQ_QUEUE_KEY", "scraper:queries");
        std::env::set_var("WORKQ_IN_PROCESSING_KEY", "scraper:current");
    }
    let config = Config::from_env().unwrap();
    assert_eq!(config.queue_key, "scraper:queries");
    assert_eq!(config.in_processing_key, "scraper:current");

    // Empty key names are rejected
    unsafe {
        std::env::set_var("WORKQ_QUEUE_KEY", "");
    }
    assert!(Config::from_env().is_err());

    // Clean up
    unsafe {
        std::env::remove_var("REDIS_URL");
        std::env::remove_var("WORKQ_QUEUE_KEY");
        std::env::remove_var("WORKQ_IN_PROCESSING_KEY");
    }
}
