//! Generates Icinga `CheckCommand` configuration objects from the clap
//! definition, one per sub-command.

pub struct CommandDescription {
    subcommand: String,
    arguments: Vec<ArgumentDescription>,
}

pub struct ArgumentDescription {
    name: String,
    value: String,
    description: Option<String>,
    is_flag: bool,
    default_value: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ToIcingaCommandError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid executable path")]
    InvalidExecutablePath,
    #[error("error converting to command description: {0}")]
    CommandDescriptionFromError(#[from] CommandDescriptionFromError),
}

impl CommandDescription {
    /// Collects the global arguments plus the sub-command's own arguments.
    pub fn from_subcommand(
        root: &clap::Command,
        sub: &clap::Command,
    ) -> Result<Self, CommandDescriptionFromError> {
        let mut arguments = Vec::new();
        for arg in root.get_arguments().chain(sub.get_arguments()) {
            if matches!(arg.get_id().as_str(), "help" | "version") {
                continue;
            }
            arguments.push(ArgumentDescription::try_from(arg)?);
        }

        Ok(CommandDescription {
            subcommand: sub.get_name().to_owned(),
            arguments,
        })
    }

    pub fn to_icinga_command(&self, name: &str) -> Result<String, ToIcingaCommandError> {
        let mut out = format!("object CheckCommand \"{name}\" {{\n");
        let current_exe = std::env::current_exe()?
            .to_str()
            .ok_or(ToIcingaCommandError::InvalidExecutablePath)?
            .to_owned();

        out.push_str(&format!(
            "  command = [ \"{current_exe}\", \"{}\" ]\n",
            self.subcommand
        ));
        out.push_str("  arguments = {\n");
        for arg in &self.arguments {
            out.push_str(&format!("  \"--{}\" = {{\n", arg.name));

            if arg.is_flag {
                out.push_str(&format!("    set_if = \"${}$\"\n", arg.value));
            } else {
                out.push_str(&format!("    value = \"${}$\"\n", arg.value));
            }

            if let Some(description) = &arg.description {
                out.push_str(&format!(
                    "    description = \"{}\"\n",
                    escape_string(description)
                ));
            }

            out.push_str("  }\n");
        }
        out.push_str("  }\n");

        out.push('\n');

        for arg in &self.arguments {
            if let Some(default_value) = &arg.default_value {
                out.push_str(&format!(
                    "  vars.{} = \"{}\"\n",
                    arg.value,
                    escape_string(default_value)
                ));
            }
        }

        out.push_str("}\n");
        Ok(out)
    }
}

fn escape_string(s: &str) -> String {
    ["\"", "$"]
        .iter()
        .fold(s.to_string(), |acc, c| acc.replace(c, &format!("\\{}", c)))
}

#[derive(Debug, thiserror::Error)]
pub enum CommandDescriptionFromError {
    #[error("missing long argument")]
    MissingLongArgument,
}

impl TryFrom<&clap::Arg> for ArgumentDescription {
    type Error = CommandDescriptionFromError;

    fn try_from(arg: &clap::Arg) -> Result<Self, Self::Error> {
        let name = arg
            .get_long()
            .ok_or(CommandDescriptionFromError::MissingLongArgument)?
            .to_owned();

        let value = name.replace('-', "_");
        let description = arg.get_help().map(|s| s.to_string());

        let is_flag = {
            let values = arg.get_possible_values();
            values.len() == 2
                && values.iter().any(|v| v.get_name() == "true")
                && values.iter().any(|v| v.get_name() == "false")
        };

        let default_value = arg
            .get_default_values()
            .first()
            .and_then(|v| v.to_str())
            .map(|s| s.to_string());

        Ok(ArgumentDescription {
            name,
            value,
            description,
            is_flag,
            default_value,
        })
    }
}

/// Print the Icinga command configuration if the GENERATE_ICINGA_COMMAND
/// environment variable is set and exit the process.
pub fn print_icinga_command_config_if_env_and_exit(
    name: &str,
    cmd: &clap::Command,
) -> Result<(), ToIcingaCommandError> {
    if std::env::var("GENERATE_ICINGA_COMMAND").is_err() {
        return Ok(());
    }

    let mut out = String::new();
    for sub in cmd.get_subcommands() {
        let description = CommandDescription::from_subcommand(cmd, sub)?;
        out.push_str(&description.to_icinga_command(&format!("{}_{}", name, sub.get_name()))?);
        out.push('\n');
    }

    println!("{}", out.trim());
    std::process::exit(0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    use crate::cli::Cli;

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string("plain"), "plain");
        assert_eq!(escape_string("a \"b\" $c"), "a \\\"b\\\" \\$c");
    }

    #[test]
    fn describes_every_subcommand() {
        let cmd = Cli::command();
        let subs: Vec<_> = cmd.get_subcommands().collect();
        assert_eq!(subs.len(), 4);

        for sub in subs {
            let description = CommandDescription::from_subcommand(&cmd, sub).unwrap();
            let rendered = description
                .to_icinga_command(&format!("check_netio_{}", sub.get_name()))
                .unwrap();
            assert!(rendered.contains("object CheckCommand"));
            assert!(rendered.contains("\"--address\""));
            assert!(rendered.contains("set_if = \"$verbose$\""));
        }
    }

    #[test]
    fn output_flags_are_set_if() {
        let cmd = Cli::command();
        let sub = cmd
            .get_subcommands()
            .find(|s| s.get_name() == "output")
            .unwrap();
        let rendered = CommandDescription::from_subcommand(&cmd, sub)
            .unwrap()
            .to_icinga_command("check_netio_output")
            .unwrap();
        assert!(rendered.contains("set_if = \"$on$\""));
        assert!(rendered.contains("set_if = \"$off$\""));
        assert!(rendered.contains("vars.port = \"80\""));
    }
}
