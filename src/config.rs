// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use knus::Decode;
use miette::{IntoDiagnostic, Result};
use tokio::fs::read_to_string;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, GuildMarker};

pub async fn parse_config(config_path: &str) -> Result<ConfigDocument> {
	let config_file_contents = read_to_string(config_path).await.into_diagnostic()?;
	let config = knus::parse(config_path, &config_file_contents)?;
	Ok(config)
}

#[derive(Debug, Decode)]
pub struct ConfigDocument {
	#[knus(child)]
	pub discord: DiscordConfig,
	#[knus(child)]
	pub database: DatabaseConfig,
}

#[derive(Debug, Decode)]
pub struct DiscordConfig {
	#[knus(child, unwrap(argument))]
	pub bot_token: String,
	/// The guild whose channel count is monitored. Events from any other guild are ignored.
	#[knus(child, unwrap(argument))]
	pub guild: u64,
	/// The channel to which enable/disable notifications are posted.
	#[knus(child, unwrap(argument))]
	pub log_channel: u64,
}

impl DiscordConfig {
	pub fn get_guild(&self) -> Id<GuildMarker> {
		Id::new(self.guild)
	}

	pub fn get_log_channel(&self) -> Id<ChannelMarker> {
		Id::new(self.log_channel)
	}
}

#[derive(Debug, Decode)]
pub struct DatabaseConfig {
	#[knus(child, unwrap(argument))]
	pub host: String,
	#[knus(child, unwrap(argument))]
	pub port: Option<u16>,
	#[knus(child, unwrap(argument))]
	pub username: String,
	#[knus(child, unwrap(argument))]
	pub password: String,
	#[knus(child, unwrap(argument))]
	pub database: String,
}
