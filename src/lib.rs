//! Claude Code hooks that post tool activity to a Slack incoming webhook.

pub mod config;
pub mod format;
pub mod hook;
pub mod input;
pub mod logging;
pub mod slack;
