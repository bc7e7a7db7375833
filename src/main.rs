mod args;
mod compare;
mod config;
mod endpoint;
mod entry;
mod error;
mod logger;
mod report;
mod response;
mod runner;
mod scenarios;
mod transport;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
