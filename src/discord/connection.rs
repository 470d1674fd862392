// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::commands::{command_definitions, route_command};
use super::events::route_events;
use crate::config::ConfigDocument;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use miette::IntoDiagnostic;
use std::sync::Arc;
use twilight_cache_inmemory::{DefaultInMemoryCache, ResourceType};
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt};
use twilight_http::client::Client;
use twilight_model::application::interaction::InteractionData;
use twilight_model::gateway::event::Event;
use twilight_model::id::Id;
use twilight_model::id::marker::ApplicationMarker;

pub fn set_up_client(config: &ConfigDocument) -> Arc<Client> {
	Arc::new(Client::new(config.discord.bot_token.clone()))
}

pub async fn run_bot(
	db_connection_pool: Pool<ConnectionManager<PgConnection>>,
	config: Arc<ConfigDocument>,
	http_client: Arc<Client>,
) -> miette::Result<()> {
	let intents = Intents::GUILDS;

	let mut shard = Shard::new(ShardId::ONE, config.discord.bot_token.clone(), intents);

	// The channel monitor reads the watched guild's channel count out of this cache, so channel
	// resources must be tracked.
	let cache = Arc::new(
		DefaultInMemoryCache::builder()
			.resource_types(ResourceType::GUILD | ResourceType::CHANNEL)
			.build(),
	);

	let application_id = {
		let application_response = http_client.current_user_application().await.into_diagnostic()?;
		application_response.model().await.into_diagnostic()?.id
	};

	{
		let interaction_client = http_client.interaction(application_id);
		let commands = command_definitions();
		interaction_client
			.set_global_commands(&commands)
			.await
			.into_diagnostic()?;
	}

	while let Some(event) = shard.next_event(EventTypeFlags::all()).await {
		let event = match event {
			Ok(event) => event,
			Err(error) => {
				tracing::warn!(source = ?error, "error receiving event");
				continue;
			}
		};
		// Update before handling so the count the handlers see includes the channel this event is for.
		cache.update(&event);

		tokio::spawn(handle_event(
			event,
			Arc::clone(&http_client),
			application_id,
			db_connection_pool.clone(),
			Arc::clone(&cache),
			Arc::clone(&config),
		));
	}

	Ok(())
}

async fn handle_event(
	event: Event,
	http_client: Arc<Client>,
	application_id: Id<ApplicationMarker>,
	db_connection_pool: Pool<ConnectionManager<PgConnection>>,
	cache: Arc<DefaultInMemoryCache>,
	config: Arc<ConfigDocument>,
) {
	let event_result = handle_event_route(event, &http_client, application_id, db_connection_pool, &cache, &config).await;
	if let Err(error) = event_result {
		tracing::error!(source = ?error, "An error occurred handling a gateway event");
	}
}

async fn handle_event_route(
	event: Event,
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
	db_connection_pool: Pool<ConnectionManager<PgConnection>>,
	cache: &DefaultInMemoryCache,
	config: &ConfigDocument,
) -> miette::Result<()> {
	tracing::debug!("Incoming gateway message: {:?}", event);
	match &event {
		Event::InteractionCreate(interaction) => {
			if let Some(InteractionData::ApplicationCommand(command_data)) = &interaction.data {
				route_command(interaction, command_data, http_client, application_id, db_connection_pool).await?;
			}
		}
		Event::ChannelCreate(_) | Event::ChannelDelete(_) => {
			route_events(&event, http_client, cache, config, db_connection_pool).await?
		}
		Event::Ready(_) => {
			tracing::info!("Discord gateway is ready");
		}
		_ => (),
	}
	Ok(())
}
