//! Recording the bid for later readers.
use std::fs::File;
use std::io::Write;
use std::path::Path;

use quote_common::{Bid, QuoteError};

/// Default output file, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "cotacao.txt";

/// Write the raw bid text to `path`, replacing any previous content.
///
/// The file holds exactly the bid: no JSON quotes, no trailing newline. It is synced to
/// disk before returning.
pub fn write_bid(path: &Path, bid: &Bid) -> Result<(), QuoteError> {
    let mut file = File::create(path)?;
    file.write_all(bid.as_str().as_bytes())?;
    file.sync_all()?;
    Ok(())
}
