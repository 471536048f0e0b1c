/// Keyword table, checked in order. The first category with a keyword
/// contained in the upper-cased description wins.
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Investment",
        &[
            "UPSTOX",
            "INDIAN CLEARING",
            "ZERODHA",
            "GROWW",
            "MUTUAL FUND",
            "STOCK",
            "TRADING",
            "INVESTMENT",
            "DEMAT",
            "CLEARING",
        ],
    ),
    ("Credit Card", &["CRED", "CREDIT CARD", "CC PAYMENT", "CARD PAYMENT"]),
    (
        "Food & Dining",
        &[
            "SWIGGY",
            "ZOMATO",
            "FOOD",
            "RESTAURANT",
            "CAFE",
            "PIZZA",
            "DOMINOS",
            "KFC",
            "MCDONALD",
            "BURGER",
        ],
    ),
    (
        "Transportation",
        &[
            "UBER",
            "OLA",
            "METRO",
            "PETROL",
            "FUEL",
            "TRANSPORT",
            "CAB",
            "RAPIDO",
            "BPCL",
            "HP",
            "IOCL",
            "MUMBAI METRO",
        ],
    ),
    (
        "Shopping",
        &["AMAZON", "FLIPKART", "SHOPPING", "MYNTRA", "AJIO", "MEESHO", "PAYTM MALL"],
    ),
    (
        "Entertainment",
        &["NETFLIX", "SPOTIFY", "MOVIE", "BOOKMYSHOW", "PRIME", "HOTSTAR", "YOUTUBE", "DISNEY"],
    ),
    (
        "Utilities",
        &["ELECTRICITY", "MOBILE", "RECHARGE", "BILL", "AIRTEL", "JIO", "VODAFONE", "BSNL"],
    ),
    ("Cash Withdrawal", &["ATM", "CASH", "WDL", "WITHDRAWAL"]),
    ("Money Transfer", &["TRANSFER", "NEFT", "IMPS", "UPI/DR", "UPI/CR"]),
    ("Income", &["SALARY", "CREDIT INTEREST", "DIVIDEND", "NEFT INWARD", "RTGS"]),
    ("Bank Charges", &["AMC", "CHARGES", "FEE", "PENALTY"]),
];

pub(crate) const OTHER: &str = "Other";

/// Assigns a spending category to a raw statement narration.
pub(crate) struct Categorizer {
    rules: Vec<(&'static str, &'static [&'static str])>,
}

impl Categorizer {
    pub(crate) fn new() -> Self {
        Self {
            rules: CATEGORY_KEYWORDS.to_vec(),
        }
    }

    pub(crate) fn categorize(&self, description: &str) -> &'static str {
        let upper = description.to_uppercase();
        self.rules
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| upper.contains(k)))
            .map(|(category, _)| *category)
            .unwrap_or(OTHER)
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new()
    }
}
