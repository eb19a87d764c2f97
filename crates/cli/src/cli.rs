use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bitmix", version)]
#[command(about = "bitmix.biz Bitcoin mixer client")]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Default)]
pub struct ConnectionArgs {
    /// Service base URL (clearnet or .onion)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Use the service's onion endpoint
    #[arg(long, global = true, conflicts_with = "endpoint")]
    pub onion: bool,

    /// Route through the Tor SOCKS proxy: true, false or auto
    #[arg(long, global = true, value_name = "MODE")]
    pub proxy: Option<String>,

    /// Keep retrying on connection errors and 5xx responses
    #[arg(long, global = true)]
    pub retry: bool,

    #[arg(long = "socks-addr", global = true, value_name = "HOST:PORT")]
    pub socks_addr: Option<String>,

    /// Per-attempt timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a mix order and print its payment URI, id and letter of guarantee
    Mix(MixArgs),

    /// Show the status of a mix order
    Check {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Print the letter of guarantee for a mix order
    #[command(alias = "letter_of_guarantee")]
    Letter {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct MixArgs {
    #[arg(long)]
    pub currency: String,

    /// Destination for the mixed coins
    #[arg(long = "output_address", alias = "output-address")]
    pub output_address: String,

    /// Service fee in percent (defaults to a random 2.1-2.9)
    #[arg(long)]
    pub fee: Option<f64>,

    /// Forwarding delay in minutes (defaults to a random 10-70)
    #[arg(long)]
    pub delay: Option<u32>,

    #[arg(long, conflicts_with = "no_affiliate")]
    pub affiliate: Option<String>,

    /// Send the order without an affiliate code
    #[arg(long)]
    pub no_affiliate: bool,
}
