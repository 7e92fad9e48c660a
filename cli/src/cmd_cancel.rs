// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::io::{self, Write};

use agendo_core::CancelOutcome;

use crate::config::CliConfig;
use crate::{backend, table};

pub async fn run(
    config: &CliConfig,
    ids: &[i64],
    all: bool,
    yes: bool,
) -> Result<(), Box<dyn Error>> {
    let connected = backend::connect(config).await?;
    let view = &connected.view;
    view.bind_user(Some(connected.user_id.clone()), None)
        .await?;

    if let [id] = ids {
        // single-row cancel path
        if !yes && !confirm(&format!("Cancel appointment {id}?"))? {
            println!("Aborted.");
            connected.disconnect().await;
            return Ok(());
        }
        view.cancel_one(*id).await?;
        println!("Appointment {id} cancelled.");
    } else {
        if all {
            view.select_all_visible(true);
        } else {
            for id in ids {
                view.toggle_selection(*id);
            }
            let skipped = ids.len() - view.state().selection.len();
            if skipped > 0 {
                println!("{skipped} id(s) not cancellable (unknown or already cancelled).");
            }
        }

        let selected = view.state().selection.len();
        if selected == 0 {
            println!("Nothing to cancel.");
            connected.disconnect().await;
            return Ok(());
        }

        if !yes && !confirm(&format!("Cancel {selected} appointment(s)?"))? {
            println!("Aborted.");
            connected.disconnect().await;
            return Ok(());
        }

        match view.cancel_selected().await? {
            CancelOutcome::NothingSelected => println!("Nothing to cancel."),
            CancelOutcome::Cancelled(count) => println!("{count} appointment(s) cancelled."),
        }
    }

    table::print_state(&view.state());
    connected.disconnect().await;
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool, Box<dyn Error>> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
