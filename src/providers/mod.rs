pub mod free_currency;
