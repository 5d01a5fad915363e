//! Channel permission overwrite helpers.
//!
//! Backs the `set_permissions` and `view_permissions` commands: parsing the
//! `name=value` overwrite syntax and computing a role's effective permissions in a
//! channel.

use serenity::all::Permissions;

/// Permissions the channel commands can toggle, as (name, bit, label).
pub const CHANNEL_PERMISSIONS: [(&str, Permissions, &str); 5] = [
    ("view", Permissions::VIEW_CHANNEL, "View Channel"),
    ("send", Permissions::SEND_MESSAGES, "Send Messages"),
    ("read_history", Permissions::READ_MESSAGE_HISTORY, "Read History"),
    ("manage", Permissions::MANAGE_MESSAGES, "Manage Messages"),
    ("attach_files", Permissions::ATTACH_FILES, "Attach Files"),
];

/// Bits explicitly allowed and denied by an overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverwriteChange {
    pub allow: Permissions,
    pub deny: Permissions,
}

impl Default for OverwriteChange {
    fn default() -> Self {
        Self {
            allow: Permissions::empty(),
            deny: Permissions::empty(),
        }
    }
}

impl OverwriteChange {
    pub fn is_empty(&self) -> bool {
        self.allow.is_empty() && self.deny.is_empty()
    }

    /// One `Label: true|false` line per toggled permission, in table order.
    pub fn summary(&self) -> Vec<String> {
        CHANNEL_PERMISSIONS
            .iter()
            .filter_map(|(_, bit, label)| {
                if self.allow.contains(*bit) {
                    Some(format!("{}: true", label))
                } else if self.deny.contains(*bit) {
                    Some(format!("{}: false", label))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Applies this change on top of an existing overwrite, keeping untouched bits.
    pub fn merge_into(&self, existing: Option<OverwriteChange>) -> OverwriteChange {
        let existing = existing.unwrap_or_default();
        OverwriteChange {
            allow: (existing.allow - self.deny) | self.allow,
            deny: (existing.deny - self.allow) | self.deny,
        }
    }
}

/// Parses a whitespace separated list of `name=value` tokens.
///
/// A value of `true` (any case) allows the permission, any other value denies it.
/// Unknown names and tokens without `=` are skipped. Later tokens win.
pub fn parse_overwrites(input: &str) -> OverwriteChange {
    let mut change = OverwriteChange::default();

    for token in input.split_whitespace() {
        let Some((name, value)) = token.split_once('=') else {
            continue;
        };
        let Some((_, bit, _)) = CHANNEL_PERMISSIONS.iter().find(|(n, _, _)| *n == name) else {
            continue;
        };

        if value.eq_ignore_ascii_case("true") {
            change.allow |= *bit;
            change.deny -= *bit;
        } else {
            change.deny |= *bit;
            change.allow -= *bit;
        }
    }

    change
}

/// Computes a role's permissions in a channel.
///
/// `base` is the guild-level permission set of `@everyone` combined with the role.
/// The `@everyone` overwrite applies first, then the role's own overwrite.
pub fn effective_role_permissions(
    base: Permissions,
    everyone_overwrite: Option<OverwriteChange>,
    role_overwrite: Option<OverwriteChange>,
) -> Permissions {
    if base.administrator() {
        return Permissions::all();
    }

    [everyone_overwrite, role_overwrite]
        .into_iter()
        .flatten()
        .fold(base, |perms, overwrite| {
            (perms - overwrite.deny) | overwrite.allow
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_tokens() {
        let change = parse_overwrites("view=true send=False attach_files=TRUE");
        assert_eq!(change.allow, Permissions::VIEW_CHANNEL | Permissions::ATTACH_FILES);
        assert_eq!(change.deny, Permissions::SEND_MESSAGES);
    }

    #[test]
    fn skips_unknown_and_malformed_tokens() {
        let change = parse_overwrites("speak=true view manage=true =false");
        assert_eq!(change.allow, Permissions::MANAGE_MESSAGES);
        assert!(change.deny.is_empty());
        assert!(parse_overwrites("nothing here").is_empty());
    }

    #[test]
    fn later_tokens_win() {
        let change = parse_overwrites("send=true send=false");
        assert!(change.allow.is_empty());
        assert_eq!(change.deny, Permissions::SEND_MESSAGES);
    }

    #[test]
    fn summary_lists_toggled_permissions_in_order() {
        let change = parse_overwrites("send=false view=true");
        assert_eq!(change.summary(), vec!["View Channel: true", "Send Messages: false"]);
    }

    #[test]
    fn merge_keeps_untouched_bits() {
        let existing = OverwriteChange {
            allow: Permissions::ATTACH_FILES,
            deny: Permissions::SEND_MESSAGES,
        };
        let merged = parse_overwrites("send=true").merge_into(Some(existing));
        assert_eq!(merged.allow, Permissions::ATTACH_FILES | Permissions::SEND_MESSAGES);
        assert!(merged.deny.is_empty());
    }

    #[test]
    fn role_overwrite_applies_after_everyone() {
        let base = Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES;
        let everyone = OverwriteChange {
            allow: Permissions::empty(),
            deny: Permissions::SEND_MESSAGES | Permissions::VIEW_CHANNEL,
        };
        let role = OverwriteChange {
            allow: Permissions::VIEW_CHANNEL,
            deny: Permissions::empty(),
        };

        let perms = effective_role_permissions(base, Some(everyone), Some(role));
        assert!(perms.view_channel());
        assert!(!perms.send_messages());
    }

    #[test]
    fn administrator_ignores_overwrites() {
        let everyone = OverwriteChange {
            allow: Permissions::empty(),
            deny: Permissions::VIEW_CHANNEL,
        };
        let perms = effective_role_permissions(Permissions::ADMINISTRATOR, Some(everyone), None);
        assert!(perms.view_channel());
    }
}
