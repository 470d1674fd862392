// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::ConfigDocument;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use std::sync::Arc;
use twilight_cache_inmemory::DefaultInMemoryCache;
use twilight_http::client::Client;
use twilight_model::gateway::event::Event;

mod channel_count;

pub async fn route_events(
	event: &Event,
	http_client: &Arc<Client>,
	cache: &DefaultInMemoryCache,
	config: &ConfigDocument,
	db_connection_pool: Pool<ConnectionManager<PgConnection>>,
) -> miette::Result<()> {
	match event {
		Event::ChannelCreate(channel) => {
			channel_count::handle_channel_create(channel, http_client, cache, config, db_connection_pool).await?
		}
		Event::ChannelDelete(channel) => {
			channel_count::handle_channel_delete(channel, http_client, cache, config, db_connection_pool).await?
		}
		_ => (),
	}

	Ok(())
}
