//! One handler per sub-command. Handlers operate on an already fetched
//! [PduStatus] so they stay testable without a device on the network.
//!
//! Threshold violations escalate the resource state; anything that prevents
//! a classification at all (missing data, unknown output ID) is returned as
//! an error and reported as Unknown by the runner.

use crate::cli::{InfoArgs, LoadArgs, OutputArgs, UptimeArgs};
use crate::error::CheckError;
use crate::model::{Output, PduStatus};
use crate::plugin::{Metric, Resource, ServiceState, Unit};

/// Name prefixed to every status line, on success and failure alike.
pub const RESOURCE_NAME: &str = "NETIO";

fn base_resource(status: &PduStatus) -> Resource {
    let mut resource = Resource::new().with_name(RESOURCE_NAME);
    if let Some(uptime) = status.agent.uptime {
        resource.push(Metric::new("uptime", uptime).with_unit(Unit::Seconds));
    }
    resource
}

fn push_output_metrics(resource: &mut Resource, output: &Output) {
    if let Some(on) = output.is_on() {
        resource.push(Metric::new("state", on));
    }
    if let Some(amps) = output.current_amps() {
        resource.push(Metric::new("current", amps).with_unit(Unit::Amperes));
    }
    if let Some(watts) = output.load {
        resource.push(Metric::new("load", watts).with_unit(Unit::Watts));
    }
    if let Some(pf) = output.power_factor {
        resource.push(Metric::new("power_factor", pf));
    }
}

/// Reports device identity. OK whenever the device answers, unless an
/// expected MAC address was given and does not match.
pub fn info(status: &PduStatus, args: &InfoArgs) -> Result<Resource, CheckError> {
    let agent = &status.agent;
    let mut resource = base_resource(status);

    if let Some(global) = &status.global_measure {
        if let Some(voltage) = global.voltage {
            resource.push(Metric::new("voltage", voltage));
        }
        if let Some(frequency) = global.frequency {
            resource.push(Metric::new("frequency", frequency));
        }
    }

    if let Some(ref expected) = args.expect_mac {
        let mac = agent
            .mac
            .as_deref()
            .ok_or(CheckError::MissingField("Agent.MAC"))?;
        if !mac.eq_ignore_ascii_case(expected) {
            resource.set_description(format!(
                "Device {}, with {}, expected {}",
                agent.display_name(),
                mac,
                expected
            ));
            resource.bump_state(ServiceState::Critical);
            return Ok(resource);
        }
    }

    resource.set_description(format!(
        "Device {} (model: {}, S/N: {}, firmware: {}, MAC {})",
        agent.display_name(),
        agent.model.as_deref().unwrap_or("unknown"),
        agent.serial_number.as_deref().unwrap_or("unknown"),
        agent.version.as_deref().unwrap_or("unknown"),
        agent.mac.as_deref().unwrap_or("unknown"),
    ));
    resource.bump_state(ServiceState::Ok);
    Ok(resource)
}

/// Compares the device uptime against the configured bounds.
pub fn uptime(status: &PduStatus, args: &UptimeArgs) -> Result<Resource, CheckError> {
    let uptime = status
        .agent
        .uptime
        .ok_or(CheckError::MissingField("Agent.Uptime"))?;

    let mut resource = base_resource(status);
    resource.bump_state(ServiceState::Ok);

    if args.min.is_some_and(|min| uptime < min) {
        resource.set_description(format!(
            "Uptime {}s is lower than expected {}s",
            uptime,
            args.min.unwrap_or_default()
        ));
        resource.bump_state(args.severity.into());
    } else if args.max.is_some_and(|max| uptime > max) {
        resource.set_description(format!(
            "Uptime {}s is larger than expected {}s",
            uptime,
            args.max.unwrap_or_default()
        ));
        resource.bump_state(args.severity.into());
    } else {
        resource.set_description(format!(
            "Device {} - uptime is {}s",
            status.agent.display_name(),
            uptime
        ));
    }

    Ok(resource)
}

/// Compares the observed on/off state of one output against the expectation.
pub fn output(status: &PduStatus, args: &OutputArgs) -> Result<Resource, CheckError> {
    let out = status
        .output(args.id)
        .ok_or(CheckError::UnknownOutput(args.id))?;
    let observed = out
        .is_on()
        .ok_or(CheckError::MissingField("Outputs.State"))?;

    let mut resource = base_resource(status);
    push_output_metrics(&mut resource, out);
    resource.bump_state(ServiceState::Ok);

    let observed_str = if observed { "on" } else { "off" };
    match args.expected_state() {
        Some(expected) if expected != observed => {
            resource.set_description(format!(
                "Output {} ({}) is {}, should be {}",
                args.id,
                out.display_name(),
                observed_str,
                if expected { "on" } else { "off" },
            ));
            resource.bump_state(ServiceState::Critical);
        }
        _ => {
            resource.set_description(format!(
                "Output {} ({}) is {}",
                args.id,
                out.display_name(),
                observed_str,
            ));
        }
    }

    Ok(resource)
}

/// Compares the power and current draw of one output against the configured
/// bounds. Watt and ampere bounds are evaluated independently so the most
/// severe violation wins.
pub fn load(status: &PduStatus, args: &LoadArgs) -> Result<Resource, CheckError> {
    let out = status
        .output(args.id)
        .ok_or(CheckError::UnknownOutput(args.id))?;
    let watts = out.load.ok_or(CheckError::MissingField("Outputs.Load"))?;
    let amps = out
        .current_amps()
        .ok_or(CheckError::MissingField("Outputs.Current"))?;

    let mut resource = base_resource(status);
    push_output_metrics(&mut resource, out);
    resource.bump_state(ServiceState::Ok);

    let severity: ServiceState = args.severity.into();
    let mut description = format!(
        "Output {} ({}) load {}A, {}W",
        args.id,
        out.display_name(),
        amps,
        watts
    );

    if args.min_watts.is_some_and(|min| watts < min) {
        description.push_str(&format!(
            ", that is lower than {}W",
            args.min_watts.unwrap_or_default()
        ));
        resource.bump_state(severity);
    } else if args.max_watts.is_some_and(|max| watts > max) {
        description.push_str(&format!(
            ", that is greater than {}W",
            args.max_watts.unwrap_or_default()
        ));
        resource.bump_state(severity);
    }

    if args.min_amps.is_some_and(|min| amps < min) {
        description.push_str(&format!(
            ", that is lower than {}A",
            args.min_amps.unwrap_or_default()
        ));
        resource.bump_state(severity);
    } else if args.max_amps.is_some_and(|max| amps > max) {
        description.push_str(&format!(
            ", that is greater than {}A",
            args.max_amps.unwrap_or_default()
        ));
        resource.bump_state(severity);
    }

    resource.set_description(description);
    Ok(resource)
}
