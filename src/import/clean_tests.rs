use super::*;

// ── title_case ────────────────────────────────────────────────

#[test]
fn test_title_case() {
    assert_eq!(title_case("SWIGGY"), "Swiggy");
    assert_eq!(title_case("big bazaar"), "Big Bazaar");
    assert_eq!(title_case("NETFLIX.COM"), "Netflix.Com");
    assert_eq!(title_case(""), "");
}

// ── SBI ───────────────────────────────────────────────────────

#[test]
fn test_sbi_upi_merchant_is_last_segment() {
    let d = clean_description(Bank::Sbi, "BY TRANSFER-UPI/DR/400252792161/SWIGGY");
    assert_eq!(d, "UPI Payment - Swiggy");
}

#[test]
fn test_sbi_upi_short_merchant() {
    assert_eq!(
        clean_description(Bank::Sbi, "TO TRANSFER-UPI/CR/4002/AB"),
        "UPI Payment"
    );
    assert_eq!(clean_description(Bank::Sbi, "UPI/DR/123"), "UPI Payment");
}

#[test]
fn test_sbi_transfers() {
    assert_eq!(
        clean_description(Bank::Sbi, "BY TRANSFER-INB IMPS12345"),
        "Bank Transfer"
    );
    assert_eq!(
        clean_description(Bank::Sbi, "TO TRANSFER-INB RENT"),
        "Money Transfer"
    );
}

#[test]
fn test_sbi_charges_and_neft() {
    assert_eq!(
        clean_description(Bank::Sbi, "AMC CHARGES FOR DEBIT CARD"),
        "Annual Maintenance Charge"
    );
    assert_eq!(
        clean_description(Bank::Sbi, "ECS/ACH RETURN CHGS"),
        "ECS Return Charges"
    );
    assert_eq!(
        clean_description(Bank::Sbi, "NEFT*ACME CORP SALARY"),
        "Salary Credit"
    );
    assert_eq!(clean_description(Bank::Sbi, "NEFT*JOHN"), "NEFT Transfer");
    assert_eq!(
        clean_description(Bank::Sbi, "ATM WDL SBI MUMBAI"),
        "ATM Cash Withdrawal"
    );
}

// ── Kotak ─────────────────────────────────────────────────────

#[test]
fn test_kotak_upi_second_segment() {
    assert_eq!(
        clean_description(Bank::Kotak, "UPI/ZOMATO/409812/Dinner"),
        "UPI - Zomato"
    );
}

#[test]
fn test_kotak_imps() {
    assert_eq!(
        clean_description(Bank::Kotak, "IMPS/AMAZON PAY/1234"),
        "IMPS - Amazon"
    );
    assert_eq!(clean_description(Bank::Kotak, "IMPS/UPSTOXSECURITIES"), "IMPS Transfer");
}

#[test]
fn test_kotak_misc() {
    assert_eq!(clean_description(Bank::Kotak, "ATM/CASH/ANDHERI"), "ATM Cash Withdrawal");
    assert_eq!(
        clean_description(Bank::Kotak, "NEFT SALARY JAN"),
        "Salary Credit"
    );
    assert_eq!(
        clean_description(Bank::Kotak, "MOBILE RECHARGE JIO"),
        "Mobile Recharge"
    );
}

// ── Axis ──────────────────────────────────────────────────────

#[test]
fn test_axis_upi() {
    assert_eq!(
        clean_description(Bank::Axis, "UPI-SWIGGY-FOOD DELIVERY-123456789"),
        "UPI - Swiggy"
    );
}

#[test]
fn test_axis_neft_and_atm() {
    assert_eq!(
        clean_description(Bank::Axis, "NEFT-ACME-SALARY"),
        "Salary Credit"
    );
    assert_eq!(clean_description(Bank::Axis, "NEFT-RENT"), "NEFT Transfer");
    assert_eq!(clean_description(Bank::Axis, "ATM-CASH-PUNE"), "ATM Cash Withdrawal");
}

// ── Fallbacks ─────────────────────────────────────────────────

#[test]
fn test_empty_description() {
    assert_eq!(clean_description(Bank::Axis, "   "), "Unknown Transaction");
}

#[test]
fn test_long_description_truncated() {
    let raw = "A".repeat(45);
    let cleaned = clean_description(Bank::Kotak, &raw);
    assert_eq!(cleaned, format!("{}...", "A".repeat(40)));
}

#[test]
fn test_short_description_kept() {
    assert_eq!(clean_description(Bank::Sbi, "  CHQ DEP 1234  "), "CHQ DEP 1234");
}
