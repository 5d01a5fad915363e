//! Typed access to a slash command's resolved options.

use serenity::all::{CommandInteraction, PartialChannel, ResolvedOption, ResolvedValue, Role, User};

use crate::error::AppError;

pub struct CommandArgs<'a> {
    options: Vec<ResolvedOption<'a>>,
}

impl<'a> CommandArgs<'a> {
    pub fn new(command: &'a CommandInteraction) -> Self {
        Self {
            options: command.data.options(),
        }
    }

    fn value(&self, name: &str) -> Option<&ResolvedValue<'a>> {
        self.options
            .iter()
            .find(|option| option.name == name)
            .map(|option| &option.value)
    }

    pub fn user(&self, name: &str) -> Option<&'a User> {
        match self.value(name) {
            Some(ResolvedValue::User(user, _)) => Some(*user),
            _ => None,
        }
    }

    pub fn role(&self, name: &str) -> Option<&'a Role> {
        match self.value(name) {
            Some(ResolvedValue::Role(role)) => Some(*role),
            _ => None,
        }
    }

    pub fn channel(&self, name: &str) -> Option<&'a PartialChannel> {
        match self.value(name) {
            Some(ResolvedValue::Channel(channel)) => Some(*channel),
            _ => None,
        }
    }

    pub fn string(&self, name: &str) -> Option<&'a str> {
        match self.value(name) {
            Some(ResolvedValue::String(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.value(name) {
            Some(ResolvedValue::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn required_user(&self, name: &str) -> Result<&'a User, AppError> {
        self.user(name).ok_or_else(|| missing(name))
    }

    pub fn required_role(&self, name: &str) -> Result<&'a Role, AppError> {
        self.role(name).ok_or_else(|| missing(name))
    }

    pub fn required_channel(&self, name: &str) -> Result<&'a PartialChannel, AppError> {
        self.channel(name).ok_or_else(|| missing(name))
    }

    pub fn required_string(&self, name: &str) -> Result<&'a str, AppError> {
        self.string(name).ok_or_else(|| missing(name))
    }

    pub fn required_integer(&self, name: &str) -> Result<i64, AppError> {
        self.integer(name).ok_or_else(|| missing(name))
    }
}

fn missing(name: &str) -> AppError {
    AppError::BadRequest(format!("Missing required argument: {}", name))
}
