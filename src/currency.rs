//! Supported currencies and their display symbols.
//!
//! The set below is what the UI offers for selection; it is fixed for the
//! process lifetime and is validated independently of whatever the rate
//! service actually returns.

/// All rates are expressed relative to this currency.
pub const BASE_CURRENCY: &str = "USD";

// Sorted by code; lookups use binary search.
static CURRENCIES: &[(&str, &str)] = &[
    ("AUD", "AUD$"),
    ("BGN", "лв"),
    ("BRL", "R$"),
    ("CAD", "CAD$"),
    ("CHF", "CHF"),
    ("CNY", "CN¥"),
    ("CZK", "Kč"),
    ("DKK", "DKK kr"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("HKD", "HK$"),
    ("HRK", "kn"),
    ("HUF", "Ft"),
    ("IDR", "Rp"),
    ("ILS", "₪"),
    ("INR", "₹"),
    ("ISK", "ISK kr"),
    ("JPY", "JP¥"),
    ("KRW", "₩"),
    ("MXN", "MX$"),
    ("MYR", "RM"),
    ("NOK", "NOK kr"),
    ("NZD", "NZ$"),
    ("PHP", "₱"),
    ("PLN", "zł"),
    ("RON", "lei"),
    ("RUB", "₽"),
    ("SEK", "SEK kr"),
    ("SGD", "S$"),
    ("THB", "฿"),
    ("TRY", "₺"),
    ("USD", "US$"),
    ("ZAR", "R"),
];

/// Returns true if `code` is one of the currencies the app offers.
pub fn is_supported(code: &str) -> bool {
    CURRENCIES.binary_search_by_key(&code, |&(c, _)| c).is_ok()
}

/// Display symbol for a supported currency code.
pub fn symbol(code: &str) -> Option<&'static str> {
    CURRENCIES
        .binary_search_by_key(&code, |&(c, _)| c)
        .ok()
        .map(|i| CURRENCIES[i].1)
}

/// All supported codes, in ascending order.
pub fn supported_codes() -> impl Iterator<Item = &'static str> {
    CURRENCIES.iter().map(|&(c, _)| c)
}
