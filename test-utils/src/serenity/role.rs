//! Test factory for creating Serenity Role objects.
//!
//! Roles are built by deserializing JSON the way Discord's API would return them.
//! Manager tier detection and the role hierarchy check both read roles built here.

use serenity::all::{Permissions, Role};

/// Creates a test Serenity Role with no permissions.
///
/// All other fields are set to reasonable defaults (not hoisted, not managed,
/// not mentionable).
///
/// # Arguments
/// - `role_id` - Discord role ID (snowflake)
/// - `name` - Role name
/// - `color` - Role color as a 32-bit integer (RGB)
/// - `position` - Role position in the hierarchy (higher = more important)
///
/// # Panics
/// - If the JSON cannot be deserialized into a Role (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// let role = create_test_role(123456789, "BotManager", 0xFF0000, 10);
/// assert_eq!(role.name, "BotManager");
/// assert_eq!(role.position, 10);
/// ```
pub fn create_test_role(role_id: u64, name: &str, color: u32, position: u16) -> Role {
    role_json(role_id, name, color, position, Permissions::empty())
}

/// Creates a test Serenity Role carrying the given guild-level permissions.
///
/// # Arguments
/// - `role_id` - Discord role ID (snowflake)
/// - `name` - Role name
/// - `position` - Role position in the hierarchy
/// - `permissions` - Permission bits granted by the role
pub fn create_test_role_with_permissions(
    role_id: u64,
    name: &str,
    position: u16,
    permissions: Permissions,
) -> Role {
    role_json(role_id, name, 0, position, permissions)
}

fn role_json(role_id: u64, name: &str, color: u32, position: u16, permissions: Permissions) -> Role {
    serde_json::from_value(serde_json::json!({
        "id": role_id.to_string(),
        "guild_id": "1",
        "name": name,
        "color": color,
        "colors": {
            "primary_color": color,
            "secondary_color": null,
            "tertiary_color": null,
        },
        "hoist": false,
        "icon": null,
        "unicode_emoji": null,
        "position": position,
        "permissions": permissions.bits().to_string(),
        "managed": false,
        "mentionable": false,
    }))
    .expect("Failed to create test role - invalid JSON structure")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coloured_role_deserializes() {
        let role = create_test_role(9, "Member", 0x3498db, 2);

        assert_eq!(role.id.get(), 9);
        assert_eq!(role.name, "Member");
        assert_eq!(role.position, 2);
    }

    #[test]
    fn carries_requested_permissions() {
        let role = create_test_role_with_permissions(
            5,
            "BotManager 2",
            3,
            Permissions::MANAGE_ROLES | Permissions::MANAGE_CHANNELS,
        );

        assert_eq!(role.name, "BotManager 2");
        assert_eq!(role.position, 3);
        assert!(role.permissions.manage_roles());
        assert!(!role.permissions.kick_members());
    }
}
