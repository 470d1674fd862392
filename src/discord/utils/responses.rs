// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub const SUCCESS: &str = "Success";
pub const INVALID_KEY: &str = "Invalid key";
pub const INVALID_LIMIT: &str = "Limits are a percentage of the channel cap; enter a whole number from 0 to 100.";
pub const INTERNAL_ERROR: &str = "An internal error occurred handling this command.";
