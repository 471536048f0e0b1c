use crate::models::Bank;

const MAX_DESCRIPTION_LEN: usize = 40;

/// Turn a raw statement narration into something readable on a dashboard.
pub(crate) fn clean_description(bank: Bank, raw: &str) -> String {
    let desc = raw.trim();
    if desc.is_empty() {
        return "Unknown Transaction".into();
    }
    let cleaned = match bank {
        Bank::Sbi => clean_sbi(desc),
        Bank::Kotak => clean_kotak(desc),
        Bank::Axis => clean_axis(desc),
    };
    cleaned.unwrap_or_else(|| shorten(desc))
}

// e.g. "BY TRANSFER-UPI/DR/400252792161/SWIGGY"
fn clean_sbi(desc: &str) -> Option<String> {
    if desc.contains("UPI/DR") || desc.contains("UPI/CR") {
        let parts: Vec<&str> = desc.split('/').collect();
        let merchant = parts.last().copied().unwrap_or("").trim();
        if parts.len() >= 4 && merchant.chars().count() > 2 {
            return Some(format!("UPI Payment - {}", title_case(merchant)));
        }
        return Some("UPI Payment".into());
    }
    if desc.contains("BY TRANSFER") {
        return Some("Bank Transfer".into());
    }
    if desc.contains("TO TRANSFER") {
        return Some("Money Transfer".into());
    }
    if desc.contains("AMC") {
        return Some("Annual Maintenance Charge".into());
    }
    if desc.contains("ECS/ACH RETURN") {
        return Some("ECS Return Charges".into());
    }
    if desc.contains("NEFT") {
        return Some(salary_or("NEFT Transfer", desc));
    }
    if desc.contains("ATM") && desc.contains("WDL") {
        return Some("ATM Cash Withdrawal".into());
    }
    None
}

// e.g. "UPI/Swiggy/409876543/Food order"
fn clean_kotak(desc: &str) -> Option<String> {
    if desc.contains("UPI/") {
        return Some(second_part("UPI", desc, '/').unwrap_or_else(|| "UPI Payment".into()));
    }
    if desc.contains("IMPS/") {
        if desc.contains("AMAZON") {
            return Some("IMPS - Amazon".into());
        }
        return Some("IMPS Transfer".into());
    }
    if desc.contains("ATM") {
        return Some("ATM Cash Withdrawal".into());
    }
    if desc.contains("SALARY") && desc.contains("NEFT") {
        return Some("Salary Credit".into());
    }
    if desc.contains("MOBILE RECHARGE") {
        return Some("Mobile Recharge".into());
    }
    None
}

// e.g. "UPI-SWIGGY-FOOD DELIVERY-123456789"
fn clean_axis(desc: &str) -> Option<String> {
    if desc.contains("UPI-") {
        return Some(second_part("UPI", desc, '-').unwrap_or_else(|| "UPI Payment".into()));
    }
    if desc.contains("NEFT-") {
        return Some(salary_or("NEFT Transfer", desc));
    }
    if desc.contains("ATM-") {
        return Some("ATM Cash Withdrawal".into());
    }
    None
}

fn second_part(prefix: &str, desc: &str, sep: char) -> Option<String> {
    desc.split(sep)
        .nth(1)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(|m| format!("{prefix} - {}", title_case(m)))
}

fn salary_or(fallback: &str, desc: &str) -> String {
    if desc.contains("SALARY") {
        "Salary Credit".into()
    } else {
        fallback.into()
    }
}

fn shorten(desc: &str) -> String {
    if desc.chars().count() > MAX_DESCRIPTION_LEN {
        let head: String = desc.chars().take(MAX_DESCRIPTION_LEN).collect();
        format!("{head}...")
    } else {
        desc.to_string()
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
pub(crate) fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
#[path = "clean_tests.rs"]
mod tests;
