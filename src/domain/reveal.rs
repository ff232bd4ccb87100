//! Visibility state machines for the dashboard sections.
//!
//! The weather side is one-way: once real readings have been charted the
//! "waiting for data" placeholder never comes back. The forecast side follows
//! the predict/reset cycle and can go back and forth.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeatherReveal {
    #[default]
    Waiting,
    Revealed,
}

impl WeatherReveal {
    /// Moves to `Revealed`. Returns true only on the first call.
    pub fn reveal(&mut self) -> bool {
        let changed = *self == Self::Waiting;
        *self = Self::Revealed;
        changed
    }

    pub fn is_revealed(&self) -> bool {
        *self == Self::Revealed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForecastReveal {
    #[default]
    Hidden,
    Shown,
}

impl ForecastReveal {
    /// Returns true if the state changed.
    pub fn show(&mut self) -> bool {
        let changed = *self == Self::Hidden;
        *self = Self::Shown;
        changed
    }

    /// Returns true if the state changed.
    pub fn hide(&mut self) -> bool {
        let changed = *self == Self::Shown;
        *self = Self::Hidden;
        changed
    }

    pub fn is_shown(&self) -> bool {
        *self == Self::Shown
    }
}

/// Dashboard regions that can be scrolled into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Forecast,
    Chart,
}
