use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Periodic tick; carries the instant timers are evaluated against
    Tick(Instant),
    Render,

    /// Advance button activated
    NextPage,
    /// Progress dot activated (zero-based)
    JumpToPage(usize),
    /// The finish callback fired on the last page
    Finished,

    ConfigChanged(PathBuf),
}
