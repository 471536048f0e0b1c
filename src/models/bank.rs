use serde::{Deserialize, Serialize};

/// Statement layouts the importer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bank {
    Sbi,
    Kotak,
    Axis,
}

impl Bank {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sbi => "sbi",
            Self::Kotak => "kotak",
            Self::Axis => "axis",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Sbi => "State Bank of India (SBI)",
            Self::Kotak => "Kotak Mahindra Bank",
            Self::Axis => "Axis Bank",
        }
    }

    /// Accepts the short identifier or the display name, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|b| lower == b.as_str() || lower == b.display_name().to_lowercase())
    }

    pub fn all() -> &'static [Bank] {
        &[Self::Sbi, Self::Kotak, Self::Axis]
    }

    /// Next bank in selector order, wrapping around.
    pub fn cycle(current: Option<Bank>) -> Bank {
        let all = Self::all();
        match current.and_then(|b| all.iter().position(|x| *x == b)) {
            Some(idx) => all[(idx + 1) % all.len()],
            None => all[0],
        }
    }
}

impl std::fmt::Display for Bank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
