use slack_hooks::hook::{self, HookKind};
use std::process::ExitCode;

fn main() -> ExitCode {
    slack_hooks::logging::init();
    hook::main(HookKind::PostToolUse)
}
