use crate::config;

/// Load settings, falling back to defaults when the file is broken or invalid.
///
/// Runs before logging is set up, so problems go to stderr.
pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("rondo: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("rondo: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}
