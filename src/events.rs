#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    EngineEvent(EngineEvent),
    AppEvent(AppEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// Re-randomize the grid
    Reseed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Stop or resume stepping, while still drawing frames
    TogglePause,

    /// The terminal changed size. The grid keeps its dimensions.
    Resize { cols: u16, rows: u16 },

    /// Exit the application
    Exit,
}
