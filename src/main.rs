// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use channel_control::config::parse_config;
use channel_control::database::{connect_db, run_embedded_migrations};
use channel_control::discord::{run_bot, set_up_client};
use std::sync::Arc;

#[tokio::main]
async fn main() -> miette::Result<()> {
	tracing_subscriber::fmt::init();

	let config = Arc::new(parse_config("config.kdl").await?);

	let db_connection_pool = connect_db(&config.database)?;
	run_embedded_migrations(&db_connection_pool)?;

	let http_client = set_up_client(&config);
	run_bot(db_connection_pool, Arc::clone(&config), http_client).await
}
