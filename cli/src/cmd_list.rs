// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use crate::config::CliConfig;
use crate::{backend, table};

pub async fn run(config: &CliConfig, search: Option<&str>) -> Result<(), Box<dyn Error>> {
    let connected = backend::connect(config).await?;
    connected
        .view
        .bind_user(Some(connected.user_id.clone()), None)
        .await?;

    if let Some(term) = search {
        connected.view.set_search(term);
    }

    table::print_state(&connected.view.state());
    connected.disconnect().await;
    Ok(())
}
