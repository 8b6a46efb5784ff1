//! # photo-organize CLI
//!
//! Command-line interface for the photo date organizer.
//!
//! ## Usage
//! ```bash
//! photo-organize copy ~/Camera ~/Pictures --recursive
//! photo-organize copy ~/Camera ~/Pictures --patterns "*.jpg;*.mp4" --output json
//! photo-organize resolve IMG_20210304_153000.jpg
//! ```

mod cli;

use photo_date_organizer::Result;

fn main() -> Result<()> {
    cli::run()
}
