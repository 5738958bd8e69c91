use crate::config::Config;
use crate::voice::Voice;
use colored::Colorize;
use prettytable::{format, Table};

/// Print the voice catalogue, marking the configured default
pub fn handle_voices(config: &Config) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row!["Voice".bold(), "Description".bold(), ""]);

    for voice in Voice::ALL {
        let marker = if voice == config.synthesis.default_voice {
            "default".green().to_string()
        } else {
            String::new()
        };
        table.add_row(prettytable::row![voice.as_str().cyan(), voice.description(), marker]);
    }

    println!("\nAvailable voices:");
    table.printstd();
    println!();
    println!("Use {} to pick one.", "blogcast convert --voice <VOICE>".cyan());
    println!();
}
