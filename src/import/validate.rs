use crate::models::Bank;

/// What the upload gate decided for a (detected, selected) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UploadDecision {
    /// File or bank selection missing.
    Incomplete,
    /// File content contradicts the selection. Cannot be overridden.
    Mismatch { detected: Bank, selected: Bank },
    /// Format not recognised; the user must confirm to continue with `selected`.
    ConfirmUnknown { selected: Bank },
    Proceed { bank: Bank },
}

impl UploadDecision {
    pub(crate) fn is_blocking(&self) -> bool {
        matches!(self, Self::Incomplete | Self::Mismatch { .. })
    }

    pub(crate) fn message(&self) -> String {
        match self {
            Self::Incomplete => "Please select both a bank and a CSV file.".into(),
            Self::Mismatch { detected, selected } => format!(
                "Bank mismatch: this file looks like a {} statement, but {} is selected. \
                 Select the matching bank or choose a different file.",
                detected.display_name(),
                selected.display_name()
            ),
            Self::ConfirmUnknown { selected } => format!(
                "Could not recognise the bank format from the file header. Continue as {}?",
                selected.display_name()
            ),
            Self::Proceed { bank } => format!("Format matches {}", bank.display_name()),
        }
    }
}

/// Compare the sniffed bank against the user's choice.
///
/// A known conflicting signal always blocks; an absent signal defers to the user.
pub(crate) fn validate_upload(
    has_file: bool,
    detected: Option<Bank>,
    selected: Option<Bank>,
) -> UploadDecision {
    let Some(selected) = selected.filter(|_| has_file) else {
        return UploadDecision::Incomplete;
    };
    match detected {
        Some(detected) if detected != selected => UploadDecision::Mismatch { detected, selected },
        Some(bank) => UploadDecision::Proceed { bank },
        None => UploadDecision::ConfirmUnknown { selected },
    }
}

/// Resolve a `ConfirmUnknown` with the user's answer. Declining yields `None`.
pub(crate) fn confirm_unknown(decision: &UploadDecision, accepted: bool) -> Option<Bank> {
    match decision {
        UploadDecision::ConfirmUnknown { selected } if accepted => Some(*selected),
        UploadDecision::Proceed { bank } => Some(*bank),
        _ => None,
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
