// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::discord::utils::responses::{INTERNAL_ERROR, INVALID_KEY, INVALID_LIMIT, SUCCESS};
use crate::model::CHANNEL_CONTROL_ID;
use crate::schema::channel_control;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use miette::{IntoDiagnostic, bail};
use std::sync::Arc;
use twilight_http::client::Client;
use twilight_model::application::command::{Command, CommandType};
use twilight_model::application::interaction::InteractionContextType;
use twilight_model::application::interaction::application_command::{CommandData, CommandOptionValue};
use twilight_model::channel::message::MessageFlags;
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_model::guild::Permissions;
use twilight_model::http::interaction::{InteractionResponse, InteractionResponseType};
use twilight_model::id::Id;
use twilight_model::id::marker::ApplicationMarker;
use twilight_util::builder::InteractionResponseDataBuilder;
use twilight_util::builder::command::{CommandBuilder, StringBuilder};

/// The configuration keys moderators can edit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ConfigKey {
	MaxChannelLimit,
	MinChannelLimit,
	DisabledFullResponse,
	DisabledDefaultResponse,
}

impl ConfigKey {
	fn from_name(name: &str) -> Option<Self> {
		match name {
			"max_channel_limit" => Some(Self::MaxChannelLimit),
			"min_channel_limit" => Some(Self::MinChannelLimit),
			"disabled_full_response" => Some(Self::DisabledFullResponse),
			"disabled_default_response" => Some(Self::DisabledDefaultResponse),
			_ => None,
		}
	}
}

/// Parses a limit value as a whole percentage of the channel cap.
fn parse_limit(raw_value: &str) -> Option<i32> {
	let limit: i32 = raw_value.parse().ok()?;
	(0..=100).contains(&limit).then_some(limit)
}

pub fn command_definition() -> Command {
	let key_option = StringBuilder::new(
		"key",
		"One of max_channel_limit, min_channel_limit, disabled_full_response, disabled_default_response",
	)
	.required(true)
	.build();
	let value_option = StringBuilder::new("value", "The new value; leave out to reset the key").build();

	CommandBuilder::new(
		"ccconfig",
		"Edit the channel control configuration",
		CommandType::ChatInput,
	)
	.contexts([InteractionContextType::Guild])
	.default_member_permissions(Permissions::MODERATE_MEMBERS)
	.option(key_option)
	.option(value_option)
	.build()
}

pub async fn handle_command(
	interaction: &InteractionCreate,
	command_data: &CommandData,
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
	db_connection_pool: Pool<ConnectionManager<PgConnection>>,
) -> miette::Result<()> {
	if interaction.guild_id.is_none() {
		bail!("Channel control config command was used outside of a guild");
	}

	let mut key_name: Option<&str> = None;
	let mut new_value: Option<&str> = None;
	for option in &command_data.options {
		match (option.name.as_str(), &option.value) {
			("key", CommandOptionValue::String(value)) => key_name = Some(value.as_str()),
			("value", CommandOptionValue::String(value)) => new_value = Some(value.as_str()),
			_ => bail!(
				"Unexpected option for the channel control config command: {}\n{:?}",
				option.name,
				command_data
			),
		}
	}
	let Some(key_name) = key_name else {
		bail!("Command data is malformed; expected `/ccconfig` to have required option `key`");
	};

	let interaction_client = http_client.interaction(application_id);

	let Some(key) = ConfigKey::from_name(key_name) else {
		let response = InteractionResponseDataBuilder::new()
			.content(INVALID_KEY)
			.flags(MessageFlags::EPHEMERAL)
			.build();
		let response = InteractionResponse {
			kind: InteractionResponseType::ChannelMessageWithSource,
			data: Some(response),
		};
		interaction_client
			.create_response(interaction.id, &interaction.token, &response)
			.await
			.into_diagnostic()?;
		return Ok(());
	};

	// A blank value resets the key to its default.
	let new_value = new_value.filter(|value| !value.trim().is_empty());

	let new_limit = match key {
		ConfigKey::MaxChannelLimit | ConfigKey::MinChannelLimit => match new_value {
			Some(raw_value) => match parse_limit(raw_value) {
				Some(limit) => Some(limit),
				None => {
					let response = InteractionResponseDataBuilder::new()
						.content(INVALID_LIMIT)
						.flags(MessageFlags::EPHEMERAL)
						.build();
					let response = InteractionResponse {
						kind: InteractionResponseType::ChannelMessageWithSource,
						data: Some(response),
					};
					interaction_client
						.create_response(interaction.id, &interaction.token, &response)
						.await
						.into_diagnostic()?;
					return Ok(());
				}
			},
			None => None,
		},
		_ => None,
	};

	let mut db_connection = db_connection_pool.get().into_diagnostic()?;

	let db_result = match key {
		ConfigKey::MaxChannelLimit => diesel::insert_into(channel_control::table)
			.values((
				channel_control::id.eq(CHANNEL_CONTROL_ID),
				channel_control::max_channel_limit.eq(new_limit),
			))
			.on_conflict(channel_control::id)
			.do_update()
			.set(channel_control::max_channel_limit.eq(new_limit))
			.execute(&mut db_connection),
		ConfigKey::MinChannelLimit => diesel::insert_into(channel_control::table)
			.values((
				channel_control::id.eq(CHANNEL_CONTROL_ID),
				channel_control::min_channel_limit.eq(new_limit),
			))
			.on_conflict(channel_control::id)
			.do_update()
			.set(channel_control::min_channel_limit.eq(new_limit))
			.execute(&mut db_connection),
		ConfigKey::DisabledFullResponse => diesel::insert_into(channel_control::table)
			.values((
				channel_control::id.eq(CHANNEL_CONTROL_ID),
				channel_control::disabled_full_response.eq(new_value),
			))
			.on_conflict(channel_control::id)
			.do_update()
			.set(channel_control::disabled_full_response.eq(new_value))
			.execute(&mut db_connection),
		ConfigKey::DisabledDefaultResponse => diesel::insert_into(channel_control::table)
			.values((
				channel_control::id.eq(CHANNEL_CONTROL_ID),
				channel_control::disabled_default_response.eq(new_value),
			))
			.on_conflict(channel_control::id)
			.do_update()
			.set(channel_control::disabled_default_response.eq(new_value))
			.execute(&mut db_connection),
	};

	let response = match db_result {
		Ok(_) => InteractionResponseDataBuilder::new().content(SUCCESS).build(),
		Err(error) => {
			tracing::error!(source = ?error, "Failed to update the channel control configuration");
			InteractionResponseDataBuilder::new()
				.content(INTERNAL_ERROR)
				.flags(MessageFlags::EPHEMERAL)
				.build()
		}
	};
	let response = InteractionResponse {
		kind: InteractionResponseType::ChannelMessageWithSource,
		data: Some(response),
	};
	interaction_client
		.create_response(interaction.id, &interaction.token, &response)
		.await
		.into_diagnostic()?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn all_documented_keys_are_editable() {
		assert_eq!(
			ConfigKey::from_name("max_channel_limit"),
			Some(ConfigKey::MaxChannelLimit)
		);
		assert_eq!(
			ConfigKey::from_name("min_channel_limit"),
			Some(ConfigKey::MinChannelLimit)
		);
		assert_eq!(
			ConfigKey::from_name("disabled_full_response"),
			Some(ConfigKey::DisabledFullResponse)
		);
		assert_eq!(
			ConfigKey::from_name("disabled_default_response"),
			Some(ConfigKey::DisabledDefaultResponse)
		);
	}

	#[test]
	fn unknown_keys_are_rejected() {
		assert_eq!(ConfigKey::from_name("badkey"), None);
		assert_eq!(ConfigKey::from_name(""), None);
		assert_eq!(ConfigKey::from_name("MAX_CHANNEL_LIMIT"), None);
		// A key list can't be edited in one go.
		assert_eq!(
			ConfigKey::from_name("disabled_full_response, disabled_default_response"),
			None
		);
	}

	#[test]
	fn limits_parse_as_whole_percentages() {
		assert_eq!(parse_limit("80"), Some(80));
		assert_eq!(parse_limit("0"), Some(0));
		assert_eq!(parse_limit("100"), Some(100));
	}

	#[test]
	fn out_of_range_limits_are_rejected() {
		assert_eq!(parse_limit("101"), None);
		assert_eq!(parse_limit("-1"), None);
	}

	#[test]
	fn non_numeric_limits_are_rejected() {
		assert_eq!(parse_limit("eighty"), None);
		assert_eq!(parse_limit("12.5"), None);
		assert_eq!(parse_limit(""), None);
	}
}
