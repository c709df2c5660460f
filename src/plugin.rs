//! Plugin-protocol primitives: service states, performance data and the
//! [Resource] status-line builder.

use std::cmp::Ordering;
use std::fmt;
use std::process;

/// Represents a service state from nagios.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceState {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl ServiceState {
    /// Returns the corresponding nagios exit code to signal the service state of self.
    pub fn exit_code(&self) -> i32 {
        match self {
            ServiceState::Ok => 0,
            ServiceState::Warning => 1,
            ServiceState::Critical => 2,
            ServiceState::Unknown => 3,
        }
    }

    /// Severity rank used when merging states. Unknown ranks below Ok so a
    /// known-good measurement is never downgraded by an absent one.
    fn severity(&self) -> u8 {
        match self {
            ServiceState::Unknown => 0,
            ServiceState::Ok => 1,
            ServiceState::Warning => 2,
            ServiceState::Critical => 3,
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServiceState::Ok => "OK",
            ServiceState::Warning => "WARNING",
            ServiceState::Critical => "CRITICAL",
            ServiceState::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

impl PartialOrd for ServiceState {
    fn partial_cmp(&self, other: &ServiceState) -> Option<Ordering> {
        self.severity().partial_cmp(&other.severity())
    }
}

/// Unit of measurement attached to a perfdata value.
#[derive(Clone, Debug, PartialEq)]
pub enum Unit {
    None,
    Seconds,
    Watts,
    Amperes,
    Percentage,
    Counter,
    Other(String),
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::None => Ok(()),
            Unit::Seconds => f.write_str("s"),
            Unit::Watts => f.write_str("W"),
            Unit::Amperes => f.write_str("A"),
            Unit::Percentage => f.write_str("%"),
            Unit::Counter => f.write_str("c"),
            Unit::Other(s) => f.write_str(s),
        }
    }
}

/// A single perfdata value. Integers and floats format differently, so both
/// are kept as-is instead of widening everything to f64.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PerfValue {
    Integer(i64),
    Float(f64),
}

impl fmt::Display for PerfValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerfValue::Integer(v) => write!(f, "{}", v),
            PerfValue::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for PerfValue {
    fn from(v: i64) -> Self {
        PerfValue::Integer(v)
    }
}

impl From<u64> for PerfValue {
    fn from(v: u64) -> Self {
        PerfValue::Integer(v as i64)
    }
}

impl From<f64> for PerfValue {
    fn from(v: f64) -> Self {
        PerfValue::Float(v)
    }
}

impl From<bool> for PerfValue {
    fn from(v: bool) -> Self {
        PerfValue::Integer(v as i64)
    }
}

/// A single metric of a resource. Optionally carries a state which takes part
/// in the automatic state determination of the owning [Resource].
#[derive(Clone, Debug)]
pub struct Metric {
    name: String,
    state: Option<ServiceState>,
    value: PerfValue,
    warning: Option<PerfValue>,
    critical: Option<PerfValue>,
    min: Option<PerfValue>,
    max: Option<PerfValue>,
    unit: Unit,
}

impl Metric {
    pub fn new(name: &str, value: impl Into<PerfValue>) -> Self {
        Metric {
            name: name.to_owned(),
            state: None,
            value: value.into(),
            warning: None,
            critical: None,
            min: None,
            max: None,
            unit: Unit::None,
        }
    }

    pub fn with_state(mut self, state: ServiceState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_warning(mut self, warning: impl Into<PerfValue>) -> Self {
        self.warning = Some(warning.into());
        self
    }

    pub fn with_critical(mut self, critical: impl Into<PerfValue>) -> Self {
        self.critical = Some(critical.into());
        self
    }

    pub fn with_min(mut self, min: impl Into<PerfValue>) -> Self {
        self.min = Some(min.into());
        self
    }

    pub fn with_max(mut self, max: impl Into<PerfValue>) -> Self {
        self.max = Some(max.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> Option<ServiceState> {
        self.state
    }

    /// Renders `name=value[unit];warn;crit;min;max` with trailing empty
    /// fields trimmed, following the plugin perfdata guidelines.
    pub fn perf_string(&self) -> String {
        // `=` is the label/value separator, single quotes delimit labels
        let name = self.name.replace('=', "_").replace('\'', "''");
        let name = if name.contains(' ') {
            format!("'{}'", name)
        } else {
            name
        };

        let mut s = format!("{}={}{}", name, self.value, self.unit);
        for field in [&self.warning, &self.critical, &self.min, &self.max] {
            s.push(';');
            if let Some(v) = field {
                s.push_str(&v.to_string());
            }
        }
        s.trim_end_matches(';').to_string()
    }
}

/// A Resource basically represents a single service if you view it from the
/// perspective of nagios. Check handlers fill one with a description and
/// metrics, escalate its state as violations are found and finally hand it
/// over to [Resource::print_and_exit].
#[derive(Debug, Default)]
pub struct Resource {
    name: Option<String>,
    state: Option<ServiceState>,
    description: Option<String>,
    metrics: Vec<Metric>,
}

impl Resource {
    pub fn new() -> Resource {
        Resource::default()
    }

    /// Set the name of this resource. Will be included in the final string output.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    /// Manually set the state for this resource. This disables the automatic
    /// state determination based on the included metrics.
    pub fn set_state(&mut self, state: ServiceState) {
        self.state = Some(state);
    }

    /// Escalates the state of this resource: the new state only wins if it is
    /// more severe than the current one.
    pub fn bump_state(&mut self, state: ServiceState) {
        match self.state {
            Some(current) if state <= current => {}
            _ => self.state = Some(state),
        }
    }

    /// Pushes a single metric into the resource.
    pub fn push(&mut self, metric: Metric) {
        self.metrics.push(metric);
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.push(metric);
        self
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Will determine a state from the given metrics.
    ///
    /// In case a state was set on the resource itself, it always wins over
    /// the metric-derived one.
    pub fn get_state(&self) -> ServiceState {
        if let Some(state) = self.state {
            return state;
        }
        let mut state = ServiceState::Unknown;
        for metric in &self.metrics {
            if let Some(st) = metric.state() {
                if state < st {
                    state = st;
                }
            }
        }
        state
    }

    /// Returns a string which nagios understands to determine the service state.
    ///
    /// Perfdata is omitted in the Unknown state so a failed probe does not
    /// feed bogus samples into the graphs.
    pub fn to_nagios_string(&self) -> String {
        let state = self.get_state();
        let mut s = String::new();

        if let Some(ref name) = self.name {
            s.push_str(name);
            s.push(' ');
        }

        s.push_str(&state.to_string());

        if let Some(ref description) = self.description {
            s.push_str(": ");
            s.push_str(description);
        }

        if !self.metrics.is_empty() && state != ServiceState::Unknown {
            s.push_str(" |");
            for metric in &self.metrics {
                s.push(' ');
                s.push_str(&metric.perf_string());
            }
        }

        s
    }

    /// Will return the exit code of the state determined via [Resource::get_state].
    pub fn exit_code(&self) -> i32 {
        self.get_state().exit_code()
    }

    /// Will print [Resource::to_nagios_string] and exit with the exit code
    /// from [Resource::exit_code].
    pub fn print_and_exit(&self) -> ! {
        println!("{}", self.to_nagios_string());
        process::exit(self.exit_code());
    }
}
