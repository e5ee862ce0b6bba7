// ---------------------------------------------------------------------------
// Display options and the render plan they produce
// ---------------------------------------------------------------------------

/// The five sidebar toggles. All start enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub show_summary: bool,
    pub show_first_rows: bool,
    pub show_duplicates: bool,
    pub show_statistics: bool,
    pub show_visualizations: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_summary: true,
            show_first_rows: true,
            show_duplicates: true,
            show_statistics: true,
            show_visualizations: true,
        }
    }
}

impl DisplayOptions {
    /// Sidebar label and backing flag of each toggle, in sidebar order.
    pub fn toggles_mut(&mut self) -> [(&'static str, &mut bool); 5] {
        [
            ("Tampilkan Ringkasan Informasi", &mut self.show_summary),
            ("Tampilkan Lima Baris Pertama", &mut self.show_first_rows),
            ("Periksa Duplikasi", &mut self.show_duplicates),
            ("Tampilkan Statistik", &mut self.show_statistics),
            ("Tampilkan Visualisasi", &mut self.show_visualizations),
        ]
    }
}

/// One block of the main body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Summary,
    FirstRows,
    Duplicates,
    Statistics,
    Visualizations,
    Footer,
}

/// Sections to draw this pass, top to bottom. The footer is always last.
pub fn render_plan(options: &DisplayOptions) -> Vec<Section> {
    let gated = [
        (options.show_summary, Section::Summary),
        (options.show_first_rows, Section::FirstRows),
        (options.show_duplicates, Section::Duplicates),
        (options.show_statistics, Section::Statistics),
        (options.show_visualizations, Section::Visualizations),
    ];
    gated
        .into_iter()
        .filter_map(|(enabled, section)| enabled.then_some(section))
        .chain(std::iter::once(Section::Footer))
        .collect()
}
