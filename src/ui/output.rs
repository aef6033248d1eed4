//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show everything, including resolution details.
    Verbose,
    /// Show progress and status.
    #[default]
    Normal,
    /// Show final status only (no spinners).
    Quiet,
}

impl OutputMode {
    /// Pick the mode from the global `--quiet`/`--verbose` flags.
    ///
    /// `--quiet` wins when both are given.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if this mode shows resolution details.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows progress spinners.
    pub fn shows_spinners(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Check if this mode shows hints.
    pub fn shows_hints(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}
