/// Visual class of the valid-fix indicator when the receiver reports a
/// good fix.
pub const FIX_OK_CLASS: &str = "badge badge-primary";

/// Visual class of the valid-fix indicator otherwise.
pub const FIX_BAD_CLASS: &str = "badge badge-secondary";

/// RTK correction badge derived from the NAV-PVT `corrSoln` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtkBadge {
    NoFix,
    Float,
    Fixed,
}

impl RtkBadge {
    /// Decodes a `corrSoln` value. Codes outside 0..=2 carry no badge;
    /// the caller decides what to do with them.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::NoFix),
            1 => Some(Self::Float),
            2 => Some(Self::Fixed),
            _ => None,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::NoFix => "No RTK",
            Self::Float => "RTK Float",
            Self::Fixed => "RTK Fixed",
        }
    }

    /// Visual class.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::NoFix => "badge badge-secondary",
            Self::Float => "badge badge-warning",
            Self::Fixed => "badge badge-primary",
        }
    }
}
