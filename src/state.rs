use crate::data::aggregate::Summaries;
use crate::data::error::DashboardError;
use crate::data::model::BikeDataset;
use crate::display::DisplayOptions;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None when loading failed).
    pub dataset: Option<BikeDataset>,

    /// Aggregations of `dataset`, computed once when it is set.
    pub summaries: Option<Summaries>,

    /// Sidebar toggles.
    pub options: DisplayOptions,

    /// Fatal error shown instead of the dashboard body.
    pub load_error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            summaries: None,
            options: DisplayOptions::default(),
            load_error: None,
        }
    }
}

impl AppState {
    /// State for the outcome of the startup load.
    pub fn from_load(result: Result<BikeDataset, DashboardError>) -> Self {
        let mut state = AppState::default();
        match result {
            Ok(dataset) => state.set_dataset(dataset),
            Err(e) => state.set_error(&e),
        }
        state
    }

    /// Ingest a loaded dataset and aggregate it. A failed aggregation is
    /// reported like a failed load.
    pub fn set_dataset(&mut self, dataset: BikeDataset) {
        match Summaries::compute(&dataset) {
            Ok(summaries) => {
                self.summaries = Some(summaries);
                self.dataset = Some(dataset);
                self.load_error = None;
            }
            Err(e) => self.set_error(&DashboardError::from(e)),
        }
    }

    pub fn set_error(&mut self, error: &DashboardError) {
        log::error!("Dashboard cannot render: {error}");
        self.dataset = None;
        self.summaries = None;
        self.load_error = Some(error.to_string());
    }

    /// Dataset and its summaries, when both are available.
    pub fn loaded(&self) -> Option<(&BikeDataset, &Summaries)> {
        self.dataset.as_ref().zip(self.summaries.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::*;
    use crate::data::error::LoadError;
    use crate::data::loader::load_reader;

    #[test]
    fn failed_load_keeps_no_data() {
        let state = AppState::from_load(Err(LoadError::Empty.into()));
        assert!(state.loaded().is_none());
        assert_eq!(
            state.load_error.as_deref(),
            Some("failed to load dataset: no data to load")
        );
    }

    #[test]
    fn successful_load_aggregates_once() -> Result<()> {
        let text = "workingday_day,cnt_day,weather_label,hr,casual_hour,registered_hour\n\
                    0,100,Cerah,0,1,2\n\
                    1,200,Cerah,1,3,4";
        let state = AppState::from_load(Ok(load_reader(text.as_bytes())?));
        let (dataset, summaries) = state.loaded().expect("dataset loaded");
        assert_eq!(dataset.len(), 2);
        assert_eq!(summaries.working_day.weekend, 100.0);
        assert_eq!(summaries.working_day.weekday, 200.0);
        assert!(state.load_error.is_none());
        Ok(())
    }
}
