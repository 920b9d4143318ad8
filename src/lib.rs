pub mod cli;
pub mod config;
pub mod convert;
pub mod currency;
pub mod log;
pub mod providers;
pub mod rate_provider;
pub mod rates;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::ui::{self, StyleType};
use crate::convert::ConversionService;
use crate::providers::free_currency::FreeCurrencyProvider;
use crate::rates::RateStore;

pub enum AppCommand {
    Convert {
        amount: String,
        from: String,
        to: String,
        swap: bool,
    },
    Rates,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency Converter starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let api_key = config.resolve_api_key()?;
    let provider = FreeCurrencyProvider::new(&config.provider.base_url, &api_key);

    let mut store = RateStore::new();
    let spinner = ui::new_spinner("Fetching exchange rates...");
    let refreshed = store.refresh(&provider).await;
    spinner.finish_and_clear();

    if let Err(e) = refreshed {
        eprintln!("{}", ui::style_text(&e.to_string(), StyleType::Error));
        return Err(e.into());
    }

    match command {
        AppCommand::Convert {
            amount,
            from,
            to,
            swap,
        } => {
            let (from, to) = if swap {
                convert::swap(&from, &to)
            } else {
                (from.as_str(), to.as_str())
            };
            let service = ConversionService::new(&store);
            cli::convert::run(&service, &amount, from, to)
        }
        AppCommand::Rates => cli::rates::run(&store),
    }
}
