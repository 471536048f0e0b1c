use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: Option<i64>,
    /// Format: "YYYY-MM-DD"
    pub date: String,
    /// Format: "HH:MM", only when the statement carries a time of day
    pub time: Option<String>,
    pub description: String,
    pub original_description: String,
    /// Credit minus debit: spending is negative.
    pub amount: Decimal,
    pub category: String,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    pub fn abs_amount(&self) -> Decimal {
        self.amount.abs()
    }

    /// "YYYY-MM" prefix of the date.
    pub fn month(&self) -> &str {
        self.date.get(..7).unwrap_or(&self.date)
    }

    pub fn hour(&self) -> Option<u32> {
        self.time
            .as_deref()
            .and_then(|t| t.split(':').next())
            .and_then(|h| h.parse().ok())
            .filter(|h| *h < 24)
    }

    /// One line of LLM context, e.g. `On 2024-01-05 you spent ₹120.00 on Food & Dining: UPI - Swiggy`.
    pub fn to_context_line(&self) -> String {
        format!(
            "On {} you spent ₹{:.2} on {}: {}",
            self.date,
            self.abs_amount(),
            self.category,
            self.description
        )
    }
}
