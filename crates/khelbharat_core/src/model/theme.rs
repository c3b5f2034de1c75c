//! Dashboard color theme preference.

/// Persisted UI theme. Anything other than the literal `dark` loads as light.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Reads a stored slot value; unknown or missing values map to `Light`.
    pub fn from_slot(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    pub fn as_slot(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Theme;

    #[test]
    fn only_literal_dark_is_dark() {
        assert_eq!(Theme::from_slot(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_slot(Some("Dark")), Theme::Light);
        assert_eq!(Theme::from_slot(None), Theme::Light);
        assert_eq!(Theme::Dark.toggled().as_slot(), "light");
    }
}
