use crate::models::Bank;

/// Header fingerprint of one bank's statement export.
struct Signature {
    bank: Bank,
    required: &'static [&'static str],
    forbidden: &'static [&'static str],
}

/// Evaluated in order, first match wins.
const SIGNATURES: &[Signature] = &[
    // SBI: Txn Date, Value Date, Description, Ref No./Cheque No., Debit, Credit, Balance
    Signature {
        bank: Bank::Sbi,
        required: &["txn date", "value date", "ref no./cheque no."],
        forbidden: &[],
    },
    // Axis: Tran Date, Chq/Ref Number, Value Dt, Withdrawal Amt, Deposit Amt, Closing Balance
    Signature {
        bank: Bank::Axis,
        required: &["tran date", "chq/ref number", "withdrawal amt", "deposit amt"],
        forbidden: &[],
    },
    // Kotak: Date, Particulars, Debit, Credit, Balance
    Signature {
        bank: Bank::Kotak,
        required: &["date", "particulars"],
        forbidden: &["tran date", "txn date"],
    },
];

/// Outcome of sniffing one file. Replaced wholesale whenever a new file is picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DetectionResult {
    pub(crate) bank: Option<Bank>,
    pub(crate) header_line: String,
}

/// Guess the bank from the first line of a statement's text.
/// Anything unrecognised, including empty input, yields `bank: None`.
pub(crate) fn detect_bank(content: &str) -> DetectionResult {
    let header_line = content
        .lines()
        .next()
        .unwrap_or("")
        .trim_start_matches('\u{feff}')
        .to_string();
    let bank = detect_from_header(&header_line);
    DetectionResult { bank, header_line }
}

pub(crate) fn detect_from_header(header_line: &str) -> Option<Bank> {
    let lower = header_line.to_lowercase();
    SIGNATURES
        .iter()
        .find(|sig| {
            sig.required.iter().all(|s| lower.contains(s))
                && !sig.forbidden.iter().any(|s| lower.contains(s))
        })
        .map(|sig| sig.bank)
}

#[cfg(test)]
#[path = "detect_tests.rs"]
mod tests;
