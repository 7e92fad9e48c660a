// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Session setup shared by the subcommands.

use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;

use agendo_core::remote::{APPOINTMENTS_TABLE, SupabaseAppointments};
use agendo_core::{AppointmentService, AppointmentView};
use agendo_supabase::SupabaseClient;

use crate::config::CliConfig;

/// A signed-in backend connection with a view bound to the user.
pub struct Connected {
    pub view: AppointmentView,
    pub service: Arc<SupabaseAppointments>,
    pub user_id: String,
    client: SupabaseClient,
}

/// Signs in and builds the appointment view (not yet bound).
pub async fn connect(config: &CliConfig) -> Result<Connected, Box<dyn Error>> {
    let client = SupabaseClient::new(config.supabase())?;

    let password = password(&config.email)?;
    let session = client
        .sign_in_with_password(&config.email, &password)
        .await?;
    tracing::info!(user = %session.user.id, "signed in");

    let table = config.table.as_deref().unwrap_or(APPOINTMENTS_TABLE);
    let user_id = session.user.id.to_string();
    let service = Arc::new(SupabaseAppointments::with_table(
        client.clone(),
        session,
        table,
    ));
    let view = AppointmentView::new(Arc::clone(&service) as Arc<dyn AppointmentService>);

    Ok(Connected {
        view,
        service,
        user_id,
        client,
    })
}

impl Connected {
    /// Revokes the session. Failures are logged, never fatal.
    pub async fn disconnect(self) {
        if let Err(err) = self.client.sign_out(self.service.session()).await {
            tracing::warn!(%err, "sign-out failed");
        }
    }
}

fn password(email: &str) -> Result<String, Box<dyn Error>> {
    if let Ok(password) = std::env::var("AGENDO_PASSWORD") {
        return Ok(password);
    }

    print!("Password for {email}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
