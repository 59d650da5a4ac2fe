pub mod aggregate;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod locale;
pub mod moves;
pub mod orchestrator;
pub mod pokemon;
pub mod presenter;
pub mod region;
pub mod server;
pub mod view;

pub use aggregate::*;
pub use config::*;
pub use error::*;
pub use fetcher::{Fetcher, HttpFetcher, fetch_as};
pub use locale::*;
pub use moves::*;
pub use orchestrator::*;
pub use pokemon::*;
pub use presenter::*;
pub use region::*;
pub use server::*;
pub use view::*;
