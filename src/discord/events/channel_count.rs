// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::ConfigDocument;
use crate::discord::utils::embeds::{threads_disabled_embed, threads_enabled_embed};
use crate::model::{
	BOT_SETTINGS_ID, BotSettings, CHANNEL_CONTROL_ID, ChannelControlConfig, TOTAL_ALLOWED_CHANNELS, ThreadDisableLevel,
};
use crate::schema::{bot_settings, channel_control};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use miette::{IntoDiagnostic, bail};
use std::sync::Arc;
use twilight_cache_inmemory::DefaultInMemoryCache;
use twilight_http::client::Client;
use twilight_model::channel::Channel;
use twilight_model::id::Id;
use twilight_model::id::marker::GuildMarker;

pub async fn handle_channel_create(
	channel: &Channel,
	http_client: &Arc<Client>,
	cache: &DefaultInMemoryCache,
	config: &ConfigDocument,
	db_connection_pool: Pool<ConnectionManager<PgConnection>>,
) -> miette::Result<()> {
	let Some(guild_id) = channel.guild_id else {
		return Ok(());
	};
	if guild_id != config.discord.get_guild() {
		return Ok(());
	}

	let channel_count = guild_channel_count(cache, guild_id);

	let mut db_connection = db_connection_pool.get().into_diagnostic()?;
	let control = channel_control_config(&mut db_connection)?;
	let settings = bot_settings_record(&mut db_connection)?;

	let max_channel_limit = control.get_max_channel_limit();
	if !should_disable(settings.thread_disable_level, channel_count, max_channel_limit) {
		return Ok(());
	}

	let update = diesel::update(bot_settings::table.find(BOT_SETTINGS_ID));
	match &control.disabled_full_response {
		Some(full_response) => update
			.set((
				bot_settings::thread_disable_level.eq(ThreadDisableLevel::NewThreads),
				bot_settings::disabled_thread_response.eq(full_response.as_str()),
			))
			.execute(&mut db_connection)
			.into_diagnostic()?,
		None => update
			.set(bot_settings::thread_disable_level.eq(ThreadDisableLevel::NewThreads))
			.execute(&mut db_connection)
			.into_diagnostic()?,
	};

	tracing::info!(channel_count, max_channel_limit, "disabled new thread creation");

	let embed = threads_disabled_embed(channel_count, max_channel_limit).into_diagnostic()?;
	http_client
		.create_message(config.discord.get_log_channel())
		.embeds(&[embed])
		.await
		.into_diagnostic()?;

	Ok(())
}

pub async fn handle_channel_delete(
	channel: &Channel,
	http_client: &Arc<Client>,
	cache: &DefaultInMemoryCache,
	config: &ConfigDocument,
	db_connection_pool: Pool<ConnectionManager<PgConnection>>,
) -> miette::Result<()> {
	let Some(guild_id) = channel.guild_id else {
		return Ok(());
	};
	if guild_id != config.discord.get_guild() {
		return Ok(());
	}

	let channel_count = guild_channel_count(cache, guild_id);

	let mut db_connection = db_connection_pool.get().into_diagnostic()?;
	let control = channel_control_config(&mut db_connection)?;
	let settings = bot_settings_record(&mut db_connection)?;

	let min_channel_limit = control.get_min_channel_limit();
	if !should_reenable(settings.thread_disable_level, channel_count, min_channel_limit) {
		return Ok(());
	}

	let update = diesel::update(bot_settings::table.find(BOT_SETTINGS_ID));
	match &control.disabled_default_response {
		Some(default_response) => update
			.set((
				bot_settings::thread_disable_level.eq(ThreadDisableLevel::None),
				bot_settings::disabled_thread_response.eq(default_response.as_str()),
			))
			.execute(&mut db_connection)
			.into_diagnostic()?,
		None => update
			.set(bot_settings::thread_disable_level.eq(ThreadDisableLevel::None))
			.execute(&mut db_connection)
			.into_diagnostic()?,
	};

	tracing::info!(channel_count, min_channel_limit, "re-enabled new thread creation");

	let embed = threads_enabled_embed(channel_count, min_channel_limit).into_diagnostic()?;
	http_client
		.create_message(config.discord.get_log_channel())
		.embeds(&[embed])
		.await
		.into_diagnostic()?;

	Ok(())
}

fn guild_channel_count(cache: &DefaultInMemoryCache, guild_id: Id<GuildMarker>) -> usize {
	cache
		.guild_channels(guild_id)
		.map(|channels| channels.len())
		.unwrap_or(0)
}

fn channel_control_config(db_connection: &mut PgConnection) -> miette::Result<ChannelControlConfig> {
	let config: Option<ChannelControlConfig> = channel_control::table
		.find(CHANNEL_CONTROL_ID)
		.first(db_connection)
		.optional()
		.into_diagnostic()?;
	Ok(config.unwrap_or_default())
}

fn bot_settings_record(db_connection: &mut PgConnection) -> miette::Result<BotSettings> {
	let settings: Option<BotSettings> = bot_settings::table
		.find(BOT_SETTINGS_ID)
		.first(db_connection)
		.optional()
		.into_diagnostic()?;
	let Some(settings) = settings else {
		bail!("The bot settings row is missing; the database wasn't migrated");
	};
	Ok(settings)
}

/// Whether the channel count has reached the portion of [TOTAL_ALLOWED_CHANNELS] at which new
/// threads are switched off. The comparison is inclusive so that a guild sitting exactly at the
/// cap trips the default limit of 100%.
fn reached_maximum(channel_count: usize, max_channel_limit: i32) -> bool {
	channel_count as i64 * 100 >= max_channel_limit as i64 * TOTAL_ALLOWED_CHANNELS as i64
}

/// Whether the channel count has fallen to the portion of [TOTAL_ALLOWED_CHANNELS] at which new
/// threads are switched back on.
fn reached_minimum(channel_count: usize, min_channel_limit: i32) -> bool {
	channel_count as i64 * 100 <= min_channel_limit as i64 * TOTAL_ALLOWED_CHANNELS as i64
}

fn should_disable(level: ThreadDisableLevel, channel_count: usize, max_channel_limit: i32) -> bool {
	level < ThreadDisableLevel::NewThreads && reached_maximum(channel_count, max_channel_limit)
}

fn should_reenable(level: ThreadDisableLevel, channel_count: usize, min_channel_limit: i32) -> bool {
	level >= ThreadDisableLevel::NewThreads && reached_minimum(channel_count, min_channel_limit)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn disables_at_full_cap_with_default_limit() {
		assert!(should_disable(ThreadDisableLevel::None, 500, 100));
	}

	#[test]
	fn stays_enabled_one_channel_below_cap() {
		assert!(!should_disable(ThreadDisableLevel::None, 499, 100));
	}

	#[test]
	fn lower_max_limit_fires_earlier() {
		assert!(should_disable(ThreadDisableLevel::None, 400, 80));
		assert!(!should_disable(ThreadDisableLevel::None, 399, 80));
	}

	#[test]
	fn disabling_is_idempotent() {
		assert!(!should_disable(ThreadDisableLevel::NewThreads, 500, 100));
		assert!(!should_disable(ThreadDisableLevel::AllThreads, 500, 100));
	}

	#[test]
	fn reenables_at_min_limit() {
		assert!(should_reenable(ThreadDisableLevel::NewThreads, 100, 20));
		assert!(!should_reenable(ThreadDisableLevel::NewThreads, 101, 20));
	}

	#[test]
	fn default_min_limit_requires_empty_guild() {
		assert!(should_reenable(ThreadDisableLevel::NewThreads, 0, 0));
		assert!(!should_reenable(ThreadDisableLevel::NewThreads, 1, 0));
	}

	#[test]
	fn reenabling_is_idempotent() {
		assert!(!should_reenable(ThreadDisableLevel::None, 100, 20));
	}

	#[test]
	fn full_disable_counts_as_disabled_for_reenable() {
		assert!(should_reenable(ThreadDisableLevel::AllThreads, 100, 20));
	}
}
