use crate::library::MetadataRow;

/// Whether the user wants sound right now.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Intent {
    #[default]
    Playing,
    Paused,
}

impl Intent {
    /// Label of the play/pause button: the action a press would take.
    pub fn button_label(self) -> &'static str {
        match self {
            Intent::Playing => "Pause",
            Intent::Paused => "Play",
        }
    }
}

/// Where the controller publishes what the user should see.
///
/// Every call happens synchronously on the event thread.
pub trait DisplaySurface {
    fn show_now_playing(&mut self, label: &str);
    /// `fraction` is always within `[0.0, 1.0]`.
    fn show_progress(&mut self, fraction: f64);
    fn show_metadata(&mut self, rows: Vec<MetadataRow>);
    fn show_intent(&mut self, intent: Intent);
}
