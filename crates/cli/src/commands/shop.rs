use std::io;

use anyhow::{Context, Result};
use shopcart_core::config::AppConfig;
use shopcart_core::Catalog;
use tracing::info;

use crate::commands::CommandResult;
use crate::session::{Session, SessionError, SessionOutcome};

pub fn run(config: &AppConfig) -> CommandResult {
    let catalog = match config.build_catalog() {
        Ok(catalog) => catalog,
        Err(error) => {
            return CommandResult::failure(
                "shop",
                "catalog_validation",
                format!("catalog issue: {error}"),
                2,
            );
        }
    };

    match run_on_stdio(&catalog, config.session.max_input_attempts) {
        Ok(outcome) => {
            info!(event_name = "system.shop.finished", outcome = ?outcome, "shopping session ended");
            CommandResult::quiet()
        }
        Err(error) => session_failure(&error),
    }
}

fn session_failure(error: &anyhow::Error) -> CommandResult {
    let (error_class, exit_code) = error
        .downcast_ref::<SessionError>()
        .map(|session_error| (session_error.error_class(), session_error.exit_code()))
        .unwrap_or(("session_io", 3));
    CommandResult::failure("shop", error_class, format!("{error:#}"), exit_code)
}

fn run_on_stdio(catalog: &Catalog, max_input_attempts: u32) -> Result<SessionOutcome> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(catalog, stdin.lock(), stdout.lock(), max_input_attempts);

    session.run().context("interactive shopping session failed")
}

#[cfg(test)]
mod tests {
    use std::io;

    use anyhow::Context;
    use serde_json::Value;
    use shopcart_core::{SessionState, SessionTransitionError};

    use super::session_failure;
    use crate::session::SessionError;

    fn class_of(output: &str) -> Value {
        let payload: Value = serde_json::from_str(output).expect("failure payload is json");
        payload["error_class"].clone()
    }

    #[test]
    fn state_machine_faults_are_not_reported_as_io() {
        let error = Err::<(), _>(SessionError::from(SessionTransitionError::NothingToComplete(
            SessionState::Menu,
        )))
        .context("interactive shopping session failed")
        .expect_err("transition error");

        let result = session_failure(&error);

        assert_eq!(result.exit_code, 5);
        assert_eq!(class_of(&result.output), "session_state");
    }

    #[test]
    fn stdio_faults_keep_the_io_class() {
        let error = Err::<(), _>(SessionError::Read(io::Error::other("terminal gone")))
            .context("interactive shopping session failed")
            .expect_err("read error");

        let result = session_failure(&error);

        assert_eq!(result.exit_code, 3);
        assert_eq!(class_of(&result.output), "session_io");
    }
}
