/// Boolean switch with explicit enable/disable semantics.
///
/// Defaults to disabled: an unset switch never changes behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flag(bool);

impl Flag {
    /// Create an enabled flag.
    pub const fn enabled() -> Self {
        Self(true)
    }

    /// Create a disabled flag.
    pub const fn disabled() -> Self {
        Self(false)
    }

    /// Parse a flag from a raw configuration value.
    ///
    /// Only `"true"` (compared case-insensitively) enables the flag;
    /// anything else, including `"1"` or `"yes"`, leaves it disabled.
    pub fn parse(raw: &str) -> Self {
        Self(raw.eq_ignore_ascii_case("true"))
    }

    /// Check if the flag is enabled.
    pub const fn is_enabled(&self) -> bool {
        self.0
    }

    /// Check if the flag is disabled.
    pub const fn is_disabled(&self) -> bool {
        !self.0
    }
}

impl From<bool> for Flag {
    fn from(b: bool) -> Self {
        Self(b)
    }
}

impl From<Flag> for bool {
    fn from(f: Flag) -> Self {
        f.0
    }
}
