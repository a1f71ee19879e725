/// Example program to print the loaded configuration
///
/// Run with: cargo run -p motion-config --example print_config

fn main() {
    // Load configuration from motion.toml
    let config = motion_config::MotionConfig::load();

    println!("=== Motion Configuration ===\n");

    println!("Animator Settings:");
    println!("  Time Scale Factor: {}", config.animator.time_scale_factor);
    println!("  Additive: {}", config.animator.additive);
    println!(
        "  Begin From Current State: {}",
        config.animator.begin_from_current_state
    );
    println!("  Reverse Values: {}", config.animator.reverse_values);
    println!(
        "  Spring Settling Duration: {}",
        config.animator.spring_settling_duration
    );
    println!();

    println!("Default Timing:");
    println!("  Duration: {}ms", config.defaults.duration_ms);
    println!("  Curve: {:?}", config.defaults.curve);
    println!();

    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
