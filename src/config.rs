use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Built-in settings. There is no config file, flag or environment override.
// ---------------------------------------------------------------------------

pub const DATA_PATH: &str = "dashboard/all_data.csv";

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// CSV read once at startup.
    pub data_path: PathBuf,
    pub window_title: &'static str,
    pub page_title: &'static str,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
    /// Remote image shown at the top of the sidebar.
    pub sidebar_image_url: &'static str,
    pub footer_caption: &'static str,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DATA_PATH),
            window_title: "Bike Sharing Dashboard",
            page_title: "Dashboard Analisis Data Bike Sharing",
            inner_size: [1200.0, 800.0],
            min_inner_size: [600.0, 400.0],
            sidebar_image_url:
                "https://tse1.mm.bing.net/th?id=OIP.8r_4XwVRYvwavNJx3Yq6awHaE8&pid=Api&P=0&h=180",
            footer_caption: "Copyright (c) Imelda Cyntia",
        }
    }
}
