use pcsc::ShareMode;

/// Fixed settings for the application window and PCSC connection.
/// There are no config files or flags; `main` uses `AppConfig::default()`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub window_title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    pub reader_placeholder: String,
    pub read_button_label: String,
    pub share_mode: ShareMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: "SmartCard Reader".to_string(),
            window_size: [1400.0, 800.0],
            min_window_size: [640.0, 400.0],
            reader_placeholder: "Select external reader".to_string(),
            read_button_label: "Read card".to_string(),
            share_mode: ShareMode::Shared,
        }
    }
}
