use std::fmt::Display;

use crate::plugin::{Resource, ServiceState};

/// Runs a check closure and converts an error into a terminal state plus
/// message. A monitoring system always expects one of the four defined exit
/// codes, so no error may escape as a panic or an unhandled crash.
pub struct Runner<E> {
    name: Option<String>,
    on_error: Option<Box<dyn FnOnce(&E) -> (ServiceState, String)>>,
}

impl<E: Display> Runner<E> {
    pub fn new() -> Self {
        Self {
            name: None,
            on_error: None,
        }
    }

    /// Plugin name prefixed to the status line when the check itself fails,
    /// so error output matches the format of a successful check.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }

    pub fn on_error(mut self, f: impl FnOnce(&E) -> (ServiceState, String) + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    /// Runs the closure. On error this will use either the handler given via
    /// [Runner::on_error] or the default, which reports Unknown with the
    /// error message. Errors are wrapped in a [Resource] so both paths emit
    /// the same status-line format.
    pub fn safe_run(self, f: impl FnOnce() -> Result<Resource, E>) -> RunnerResult {
        match f() {
            Ok(resource) => RunnerResult::Ok(resource),
            Err(err) => {
                let (state, msg) = self
                    .on_error
                    .map(|f| f(&err))
                    .unwrap_or_else(|| (ServiceState::Unknown, err.to_string()));

                let mut resource = Resource::new().with_description(msg);
                if let Some(ref name) = self.name {
                    resource = resource.with_name(name);
                }
                resource.set_state(state);

                RunnerResult::Err(resource)
            }
        }
    }
}

impl<E: Display> Default for Runner<E> {
    fn default() -> Self {
        Self::new()
    }
}

pub enum RunnerResult {
    Ok(Resource),
    Err(Resource),
}

impl RunnerResult {
    pub fn print_and_exit(self) -> ! {
        match self {
            RunnerResult::Ok(resource) | RunnerResult::Err(resource) => resource.print_and_exit(),
        }
    }
}
