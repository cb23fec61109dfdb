// In app/src/main.rs

use anyhow::Result;
use app_config::Settings;
use clap::{Args, Parser, Subcommand};
use core_types::{Mode, Side, Symbol, TimeInForce};
use execution::Executor;
use rust_decimal::Decimal;
use serde::Serialize;
use strategies::{ExecutionStrategy, Oco, Twap, TwapPlan};
mod logging;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Places mock or live Binance USDT-M futures orders, and runs simulated TWAP and OCO strategies."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every command. Values stay raw here and go through the
/// validators, so the operator sees the same messages whatever the command.
#[derive(Args, Debug)]
struct OrderArgs {
    /// Trading symbol, e.g. BTCUSDT.
    #[arg(long)]
    symbol: String,

    /// BUY or SELL (any case).
    #[arg(long)]
    side: String,

    /// Order quantity, e.g. 0.001.
    #[arg(long)]
    quantity: String,

    /// Run mode: mock or live (live requires BINANCE_API_KEY and BINANCE_API_SECRET).
    #[arg(long, default_value = "mock")]
    mode: Mode,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Places a market order.
    Market {
        #[command(flatten)]
        order: OrderArgs,
    },

    /// Places a limit order.
    Limit {
        #[command(flatten)]
        order: OrderArgs,

        /// Limit price, e.g. 60000.
        #[arg(long)]
        price: String,

        /// GTC, IOC or FOK.
        #[arg(long, default_value = "GTC")]
        time_in_force: String,
    },

    /// Splits a market order into equal chunks placed at a fixed interval (simulated TWAP).
    Twap {
        #[command(flatten)]
        order: OrderArgs,

        /// Number of parts to split into. Defaults to `simulation.twap_chunks`.
        #[arg(long)]
        chunks: Option<u32>,

        /// Seconds between chunks. Defaults to `simulation.twap_interval_secs`.
        #[arg(long)]
        interval: Option<f64>,
    },

    /// Places a take-profit and a stop-loss limit order and simulates one executing (simulated OCO).
    Oco {
        #[command(flatten)]
        order: OrderArgs,

        /// Take-profit price.
        #[arg(long)]
        tp: String,

        /// Stop-loss price.
        #[arg(long)]
        sl: String,
    },
}

/// The shared flags after validation.
#[derive(Debug)]
struct ValidatedOrder {
    symbol: Symbol,
    side: Side,
    quantity: Decimal,
    mode: Mode,
}

impl OrderArgs {
    fn validate(&self) -> Result<ValidatedOrder> {
        Ok(ValidatedOrder {
            symbol: check(core_types::validate_symbol(&self.symbol))?,
            side: check(core_types::validate_side(&self.side))?,
            quantity: check(core_types::validate_quantity(&self.quantity))?,
            mode: self.mode,
        })
    }
}

/// Logs a rejected value at ERROR and turns it into the command's error.
fn check<T>(result: core_types::Result<T>) -> Result<T> {
    result.map_err(|e| {
        tracing::error!("{}", e);
        anyhow::Error::new(e)
    })
}

/// Builds the executor for `mode`. Live mode fails here if credentials are missing.
fn executor_for(mode: Mode, settings: &Settings) -> Result<Box<dyn Executor>> {
    let executor = execution::build_executor(mode, settings)?;
    tracing::debug!(executor = executor.name(), "Executor ready.");
    Ok(executor)
}

fn print_json<T: Serialize>(label: &str, value: &T) -> Result<()> {
    println!("{}: {}", label, serde_json::to_string_pretty(value)?);
    Ok(())
}

// --- Main Application Entry Point ---

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let settings = app_config::load_settings()?;
    logging::init(&settings.app.log_level, &settings.app.log_file)?;
    tracing::debug!(environment = %settings.app.environment, "Application settings loaded.");

    run(cli.command, &settings).await
}

/// Dispatches one parsed command.
async fn run(command: Commands, settings: &Settings) -> Result<()> {
    match command {
        Commands::Market { order } => handle_market(order, settings).await,
        Commands::Limit {
            order,
            price,
            time_in_force,
        } => handle_limit(order, price, time_in_force, settings).await,
        Commands::Twap {
            order,
            chunks,
            interval,
        } => handle_twap(order, chunks, interval, settings).await,
        Commands::Oco { order, tp, sl } => handle_oco(order, tp, sl, settings).await,
    }
}

// --- Subcommand Logic ---

async fn handle_market(args: OrderArgs, settings: &Settings) -> Result<()> {
    let order = args.validate()?;

    let executor = executor_for(order.mode, settings)?;
    let response = executor
        .place_market_order(&order.symbol, order.side, order.quantity)
        .await?;

    print_json("Order response", &response)?;
    tracing::info!("Market order completed.");
    Ok(())
}

async fn handle_limit(
    args: OrderArgs,
    price: String,
    time_in_force: String,
    settings: &Settings,
) -> Result<()> {
    let order = args.validate()?;
    let price = check(core_types::validate_price(&price))?;
    let time_in_force: TimeInForce = check(time_in_force.parse())?;

    let executor = executor_for(order.mode, settings)?;
    let response = executor
        .place_limit_order(&order.symbol, order.side, order.quantity, price, time_in_force)
        .await?;

    print_json("Order response", &response)?;
    tracing::info!("Limit order placed.");
    Ok(())
}

#[derive(Serialize)]
struct TwapReport<'a> {
    strategy: &'static str,
    symbol: &'a Symbol,
    side: Side,
    total_quantity: Decimal,
    chunks: u32,
    per_chunk: Decimal,
    orders: &'a [core_types::OrderResponse],
}

async fn handle_twap(
    args: OrderArgs,
    chunks: Option<u32>,
    interval: Option<f64>,
    settings: &Settings,
) -> Result<()> {
    let order = args.validate()?;
    let chunks = chunks.unwrap_or(settings.simulation.twap_chunks);
    let interval = interval.unwrap_or(settings.simulation.twap_interval_secs);
    let plan = TwapPlan::new(order.quantity, chunks, interval).inspect_err(|e| {
        tracing::error!("{}", e);
    })?;

    let executor = executor_for(order.mode, settings)?;
    let twap = Twap::new(order.symbol.clone(), order.side, plan);
    let orders = twap.run(executor.as_ref()).await?;

    print_json(
        "TWAP results",
        &TwapReport {
            strategy: twap.name(),
            symbol: &order.symbol,
            side: order.side,
            total_quantity: twap.plan().total_quantity(),
            chunks: twap.plan().chunks(),
            per_chunk: twap.plan().per_chunk(),
            orders: &orders,
        },
    )?;
    Ok(())
}

async fn handle_oco(args: OrderArgs, tp: String, sl: String, settings: &Settings) -> Result<()> {
    let order = args.validate()?;
    let take_profit = check(core_types::validate_price(&tp))?;
    let stop_loss = check(core_types::validate_price(&sl))?;
    let oco = Oco::new(
        order.symbol,
        order.side,
        order.quantity,
        take_profit,
        stop_loss,
        settings.simulation.oco_settle_secs,
    )?;

    let executor = executor_for(order.mode, settings)?;
    let pair = oco.run(executor.as_ref()).await?;

    print_json("OCO pair (simulated)", &pair)?;
    if let Some(executed) = pair.executed_order() {
        println!("Simulated executed order id: {}", executed.order_id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("orderbot").chain(args.iter().copied()))
    }

    fn order_args(symbol: &str, side: &str, quantity: &str, mode: Mode) -> OrderArgs {
        OrderArgs {
            symbol: symbol.to_string(),
            side: side.to_string(),
            quantity: quantity.to_string(),
            mode,
        }
    }

    fn fast_settings() -> Settings {
        let mut settings = Settings::default();
        settings.simulation.twap_interval_secs = 0.0;
        settings.simulation.oco_settle_secs = 0.0;
        settings
    }

    #[test]
    fn mode_defaults_to_mock() {
        let cli = parse(&["market", "--symbol", "BTCUSDT", "--side", "buy", "--quantity", "0.001"]).unwrap();
        match cli.command {
            Commands::Market { order } => assert_eq!(order.mode, Mode::Mock),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_mode_is_rejected_by_the_parser() {
        let err = parse(&[
            "market", "--symbol", "BTCUSDT", "--side", "BUY", "--quantity", "1", "--mode", "paper",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn oco_requires_both_levels() {
        assert!(parse(&["oco", "--symbol", "BTCUSDT", "--side", "BUY", "--quantity", "1", "--tp", "70000"]).is_err());
    }

    #[test]
    fn twap_flags_are_optional() {
        let cli = parse(&["twap", "--symbol", "BTCUSDT", "--side", "SELL", "--quantity", "0.01"]).unwrap();
        match cli.command {
            Commands::Twap { chunks, interval, .. } => {
                assert_eq!(chunks, None);
                assert_eq!(interval, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn shared_flags_validate_into_typed_values() {
        let order = order_args("ETHUSDT", "sell", "0.25", Mode::Mock).validate().unwrap();
        assert_eq!(order.symbol.as_str(), "ETHUSDT");
        assert_eq!(order.side, Side::Sell);
        assert_eq!(order.quantity, dec!(0.25));
    }

    #[tokio::test]
    async fn validation_fails_before_live_credentials_are_read() {
        let err = handle_market(order_args("btc", "BUY", "1", Mode::Live), &fast_settings())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Symbol should be 4-12 chars alphanumeric uppercase (e.g., BTCUSDT)"
        );
    }

    #[tokio::test]
    async fn limit_rejects_bad_price() {
        let err = handle_limit(
            order_args("BTCUSDT", "BUY", "1", Mode::Mock),
            "0".to_string(),
            "GTC".to_string(),
            &fast_settings(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Price must be > 0");
    }

    #[tokio::test]
    async fn mock_commands_run_end_to_end() {
        let settings = fast_settings();
        handle_market(order_args("BTCUSDT", "BUY", "0.001", Mode::Mock), &settings).await.unwrap();
        handle_limit(
            order_args("BTCUSDT", "sell", "0.001", Mode::Mock),
            "60000".to_string(),
            "gtc".to_string(),
            &settings,
        )
        .await
        .unwrap();
        handle_twap(order_args("BTCUSDT", "BUY", "0.01", Mode::Mock), Some(5), None, &settings)
            .await
            .unwrap();
        handle_oco(
            order_args("BTCUSDT", "BUY", "0.001", Mode::Mock),
            "70000".to_string(),
            "50000".to_string(),
            &settings,
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn twap_with_zero_chunks_is_rejected() {
        let err = handle_twap(order_args("BTCUSDT", "BUY", "0.01", Mode::Mock), Some(0), None, &fast_settings())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("at least one chunk"));
    }
}
