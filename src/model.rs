// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::schema::{bot_settings, channel_control};
use diesel::prelude::*;
use diesel_derive_enum::DbEnum;

/// The number of channels a guild is allowed before it is considered full. The configured limits
/// are percentages of this cap.
pub const TOTAL_ALLOWED_CHANNELS: u32 = 500;

/// Primary key of the single [BotSettings] row.
pub const BOT_SETTINGS_ID: i32 = 1;

/// Primary key of the single [ChannelControlConfig] row.
pub const CHANNEL_CONTROL_ID: i32 = 1;

/// How far thread creation is shut off for the bot. The variants are ordered by severity;
/// anything at or above [Self::NewThreads] means no new threads can be opened.
#[derive(DbEnum, Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
#[ExistingTypePath = "crate::schema::sql_types::ThreadDisableLevel"]
pub enum ThreadDisableLevel {
	/// Threads operate normally.
	None,
	/// New threads can't be opened; existing threads continue.
	NewThreads,
	/// No thread activity at all. Never set by the channel monitor, but it must survive
	/// round-trips and count as "already disabled".
	AllThreads,
}

/// The bot-global settings consumed by the thread-creation side of the bot. Always exactly one
/// row, seeded by the migrations.
#[derive(Insertable, Queryable)]
#[diesel(table_name = bot_settings)]
pub struct BotSettings {
	pub id: i32,
	/// The current thread-disable state.
	pub thread_disable_level: ThreadDisableLevel,
	/// The message shown to users who try to open a thread while creation is disabled.
	/// When unset, the built-in message is used.
	pub disabled_thread_response: Option<String>,
}

/// The channel-control configuration record. At most one row; created the first time a
/// moderator sets a key.
#[derive(Insertable, Queryable)]
#[diesel(table_name = channel_control)]
pub struct ChannelControlConfig {
	pub id: i32,
	/// Channel usage percentage at which new threads are disabled.
	pub max_channel_limit: Option<i32>,
	/// Channel usage percentage at which new threads are re-enabled.
	pub min_channel_limit: Option<i32>,
	/// Replacement disabled-thread response to apply when threads are disabled.
	pub disabled_full_response: Option<String>,
	/// Disabled-thread response to restore when threads are re-enabled.
	pub disabled_default_response: Option<String>,
}

impl ChannelControlConfig {
	/// The creation threshold as a percentage of [TOTAL_ALLOWED_CHANNELS].
	///
	/// For the raw database representation, use [Self::max_channel_limit].
	pub fn get_max_channel_limit(&self) -> i32 {
		self.max_channel_limit.unwrap_or(100)
	}

	/// The deletion threshold as a percentage of [TOTAL_ALLOWED_CHANNELS].
	///
	/// For the raw database representation, use [Self::min_channel_limit].
	pub fn get_min_channel_limit(&self) -> i32 {
		self.min_channel_limit.unwrap_or(0)
	}
}

impl Default for ChannelControlConfig {
	fn default() -> Self {
		Self {
			id: CHANNEL_CONTROL_ID,
			max_channel_limit: None,
			min_channel_limit: None,
			disabled_full_response: None,
			disabled_default_response: None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn disable_levels_order_by_severity() {
		assert!(ThreadDisableLevel::None < ThreadDisableLevel::NewThreads);
		assert!(ThreadDisableLevel::NewThreads < ThreadDisableLevel::AllThreads);
		assert!(ThreadDisableLevel::AllThreads >= ThreadDisableLevel::NewThreads);
	}

	#[test]
	fn unset_limits_fall_back_to_defaults() {
		let config = ChannelControlConfig::default();
		assert_eq!(config.get_max_channel_limit(), 100);
		assert_eq!(config.get_min_channel_limit(), 0);
	}

	#[test]
	fn stored_limits_override_defaults() {
		let config = ChannelControlConfig {
			max_channel_limit: Some(80),
			min_channel_limit: Some(20),
			..ChannelControlConfig::default()
		};
		assert_eq!(config.get_max_channel_limit(), 80);
		assert_eq!(config.get_min_channel_limit(), 20);
	}
}
