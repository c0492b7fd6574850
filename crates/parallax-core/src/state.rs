/// Values the binder mutates as scroll/resize events come in.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RuntimeState {
    /// Last computed progress. Left untouched while the host is out of view.
    pub percent_scrolled: f64,
    /// Cached media height, refreshed on resize/load.
    pub media_height: f64,
    /// A scroll event is waiting for its frame. Advisory only.
    pub scrolling: bool,
}
