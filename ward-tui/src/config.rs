use clap::Parser;
use dotenv::dotenv;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Base URL of the ward-api audit service
    #[arg(long, env = "WARD_API_URL", default_value = "http://127.0.0.1:8787")]
    pub api_url: String,

    /// Base URL of the wallet-holdings endpoint
    #[arg(long, env = "HOLDINGS_API_URL", default_value = "http://127.0.0.1:8787")]
    pub holdings_url: String,

    /// Base URL of the market-data provider
    #[arg(
        long,
        env = "DEXSCREENER_URL",
        default_value = "https://api.dexscreener.com"
    )]
    pub dexscreener_url: String,

    /// Keypair file path; without one the DAO tab is read-only
    #[arg(short, long, env = "KEYPAIR_PATH")]
    pub keypair_path: Option<String>,
}

pub fn load_config() -> Args {
    dotenv().ok();
    Args::parse()
}
