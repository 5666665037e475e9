use clap::Parser;
use log::LevelFilter;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Port the embedded browser expects the gateway on.
pub const DEFAULT_PORT: u16 = 7766;

#[derive(Parser, Debug)]
#[command(name = "zipbrowser")]
#[command(version)]
#[command(about = "Serve ZIP and MAFF archive contents to a local browser", long_about = None)]
#[command(after_help = "Examples:\n  \
  zipbrowser book.zip            serve archives, print the URL opening book.zip\n  \
  zipbrowser -p 8080 -v          serve on port 8080 with informational logging")]
pub struct Cli {
    /// Archive whose start URL is printed
    #[arg(value_name = "ARCHIVE")]
    pub archive: Option<String>,

    /// Address to listen on
    #[arg(short = 'l', long, value_name = "ADDR", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub listen: IpAddr,

    /// Port to listen on
    #[arg(short = 'p', long, value_name = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Log more (-vv => debug, -vvv => trace)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log less (-qq => nothing)
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.listen, self.port)
    }

    pub fn log_level(&self) -> LevelFilter {
        match i16::from(self.verbose) - i16::from(self.quiet) {
            i16::MIN..=-2 => LevelFilter::Off,
            -1 => LevelFilter::Error,
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
