//! CLI entry point.
//!
//! # Responsibility
//! - Parse the single optional `--config <path>` startup parameter.
//! - Run the full startup sequence, show a snapshot, shut down cleanly.

use lifebook_core::view::food_panel::FoodFlowPanel;
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config_path = match parse_config_path(std::env::args().skip(1)) {
        Ok(path) => path,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("usage: lifebook_cli [--config <path>]");
            return ExitCode::FAILURE;
        }
    };

    let mut app = lifebook_core::init(config_path.as_deref());
    info!(
        "event=cli_start module=cli status=ok version={}",
        lifebook_core::core_version()
    );

    let scheduled = app.start_reminders(Box::new(|reminder| {
        info!(
            "event=reminder_due module=cli status=ok description={}",
            reminder.description
        );
    }));

    let manager = app.manager();
    println!("lifebook {}", lifebook_core::core_version());
    println!("contacts:  {}", manager.address_book().len());
    println!("profiles:  {}", manager.profile_list().len());
    println!("foods:     {}", manager.food_list().len());
    println!("records:   {}", manager.record_list().len());
    println!("events:    {}", manager.calendar().events().len());
    println!("reminders: {} ({} scheduled)", manager.calendar().reminders().len(), scheduled);

    let panel = FoodFlowPanel::attach(app.manager_mut());
    println!("\nfood recommendations:");
    for card in panel.cards() {
        println!("  {card}");
    }
    panel.detach(app.manager_mut());

    app.shutdown();
    ExitCode::SUCCESS
}

fn parse_config_path(args: impl Iterator<Item = String>) -> Result<Option<PathBuf>, String> {
    let mut config_path: Option<PathBuf> = None;
    let mut args = args;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--config requires a path".to_string())?;
                config_path = Some(PathBuf::from(value));
            }
            other if config_path.is_none() && !other.starts_with('-') => {
                config_path = Some(PathBuf::from(other));
            }
            other => return Err(format!("unrecognized argument: {other}")),
        }
    }

    Ok(config_path)
}
