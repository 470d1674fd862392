// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::model::TOTAL_ALLOWED_CHANNELS;
use twilight_model::channel::message::embed::Embed;
use twilight_util::builder::embed::EmbedBuilder;
use twilight_validate::embed::EmbedValidationError;

const DISABLED_COLOR: u32 = 0xe74c3c;
const ENABLED_COLOR: u32 = 0x2ecc71;

/// Generates the log-channel notification for new thread creation being switched off.
pub fn threads_disabled_embed(channel_count: usize, max_channel_limit: i32) -> Result<Embed, EmbedValidationError> {
	let description = format!(
		"Total channel count ({} of {}) reached the maximum limit ({}%)",
		channel_count, TOTAL_ALLOWED_CHANNELS, max_channel_limit
	);
	let embed = EmbedBuilder::new()
		.title("Channel Control: New threads disabled")
		.description(description)
		.color(DISABLED_COLOR)
		.validate()?
		.build();
	Ok(embed)
}

/// Generates the log-channel notification for new thread creation being switched back on.
pub fn threads_enabled_embed(channel_count: usize, min_channel_limit: i32) -> Result<Embed, EmbedValidationError> {
	let description = format!(
		"Total channel count ({} of {}) fell to the minimum limit ({}%)",
		channel_count, TOTAL_ALLOWED_CHANNELS, min_channel_limit
	);
	let embed = EmbedBuilder::new()
		.title("Channel Control: New threads enabled")
		.description(description)
		.color(ENABLED_COLOR)
		.validate()?
		.build();
	Ok(embed)
}
