//! Progress bar utilities for harvest runs

use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar over a known number of entries
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})")
            .expect("Invalid progress bar template")
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}
