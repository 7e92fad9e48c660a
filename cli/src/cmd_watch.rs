// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use agendo_core::ChangeFeed;

use crate::config::CliConfig;
use crate::{backend, table};

pub async fn run(config: &CliConfig) -> Result<(), Box<dyn Error>> {
    let connected = backend::connect(config).await?;
    let view = &connected.view;
    view.bind_user(
        Some(connected.user_id.clone()),
        Some(&*connected.service as &dyn ChangeFeed),
    )
    .await?;

    let mut state_rx = view.subscribe();
    table::print_state(&view.state());
    println!("Watching for changes, Ctrl-C to quit.");

    loop {
        tokio::select! {
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = state_rx.borrow_and_update().clone();
                if state.loading {
                    continue; // wait for the settled state
                }
                println!();
                table::print_state(&state);
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }

    connected.disconnect().await;
    Ok(())
}
